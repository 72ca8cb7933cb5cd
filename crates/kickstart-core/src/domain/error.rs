// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep copies of per-file failures)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Malformed class identifier '{input}': {reason}")]
    MalformedIdentifier { input: String, reason: String },

    #[error("Invalid plugin file '{path}': {reason}")]
    InvalidPluginFile { path: PathBuf, reason: String },

    #[error("Identifier segment '{segment}' cannot be used as a path component")]
    UnsafeSegment { segment: String },

    #[error("Unknown lifecycle phase '{0}'")]
    InvalidPhase(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedIdentifier { input, .. } => vec![
                format!("Could not parse '{}' as a class identifier", input),
                "Use namespace separators, e.g. Vendor\\Plugin\\Service\\Example_Service".into(),
            ],
            Self::InvalidPluginFile { path, .. } => vec![
                format!("Plugin file: {}", path.display()),
                "Pass the main plugin file with --plugin-file".into(),
                "Or set plugin.file in your configuration".into(),
            ],
            Self::UnsafeSegment { segment } => vec![
                format!("'{}' contains path separators or relative components", segment),
                "Class names must map to a single file name".into(),
            ],
            Self::InvalidPhase(_) => vec!["Valid phases: hooks, run, deactivate".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedIdentifier { .. } | Self::UnsafeSegment { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidPluginFile { .. } => ErrorCategory::NotFound,
            Self::InvalidPhase(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
