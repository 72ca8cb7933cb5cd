//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Internal lock was poisoned by a panicking thread.
    #[error("Failed to acquire filesystem lock")]
    LockPoisoned,

    /// A directory was required.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// No command with this name was registered with the host.
    #[error("Unknown command '{name}'")]
    CommandNotFound { name: String, available: Vec<String> },

    /// A command received an argument it does not declare.
    #[error("Invalid argument for '{command}': {reason}")]
    InvalidArgument { command: String, reason: String },

    /// An attachment failed while handling a lifecycle phase.
    #[error("Attachment '{attachment}' failed during {phase}: {reason}")]
    AttachmentFailed {
        attachment: String,
        phase: String,
        reason: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            Self::LockPoisoned => vec![
                "An earlier operation panicked while holding the lock".into(),
                "Re-run the command".into(),
            ],
            Self::NotADirectory { path } => vec![
                format!("'{}' is not a directory", path.display()),
                "Point --plugin-file at the main file of the plugin".into(),
            ],
            Self::CommandNotFound { available, .. } => {
                let mut suggestions = vec!["Registered commands:".to_string()];
                suggestions.extend(available.iter().map(|name| format!("  • {name}")));
                suggestions
            }
            Self::InvalidArgument { command, .. } => {
                vec![format!("Run 'wpkickstart {command} --help' for usage")]
            }
            Self::AttachmentFailed { attachment, .. } => vec![
                format!("The '{}' attachment reported an error", attachment),
                "Re-run with -vv for details".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. }
            | Self::LockPoisoned
            | Self::AttachmentFailed { .. } => ErrorCategory::Internal,
            Self::NotADirectory { .. } | Self::CommandNotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidArgument { .. } => ErrorCategory::Validation,
        }
    }
}
