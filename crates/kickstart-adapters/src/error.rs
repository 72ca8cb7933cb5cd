//! Adapter-level I/O errors.
//!
//! Adapters keep the underlying `io::Error` / `walkdir::Error` as the source
//! and convert into the core's `FilesystemError` at the port boundary.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use kickstart_core::{application::ApplicationError, error::KickstartError};

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Failed to {operation}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Directory walk error: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl AdapterError {
    pub fn io(operation: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Walk { path, .. } => path,
        }
    }
}

impl From<AdapterError> for KickstartError {
    fn from(e: AdapterError) -> Self {
        ApplicationError::FilesystemError {
            path: e.path().to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    }
}
