//! Local filesystem adapter using std::fs, walkdir and tempfile.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use kickstart_core::{
    application::ports::{FileWalk, Filesystem},
    error::KickstartResult,
};

use crate::error::AdapterError;

/// Production filesystem implementation.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn canonicalize(&self, path: &Path) -> KickstartResult<PathBuf> {
        fs::canonicalize(path).map_err(|e| AdapterError::io("canonicalize", path, e).into())
    }

    /// Symlinks are followed; walkdir tracks the ancestors of every entry and
    /// reports a link back into one of them as an error instead of looping.
    fn walk(&self, root: &Path) -> FileWalk<'_> {
        let base = root.to_path_buf();
        let entries = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(source) => {
                    let path = source.path().map_or_else(|| base.clone(), Path::to_path_buf);
                    Some(Err(AdapterError::Walk { path, source }.into()))
                }
            });
        Box::new(entries)
    }

    fn read_to_string(&self, path: &Path) -> KickstartResult<String> {
        fs::read_to_string(path).map_err(|e| AdapterError::io("read file", path, e).into())
    }

    /// Write to a temp file in the target's directory, flush it to disk and
    /// rename it over the target. The original permissions are carried over.
    fn write_atomic(&self, path: &Path, contents: &str) -> KickstartResult<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let permissions = fs::metadata(path).map(|m| m.permissions()).ok();

        let mut tmp = tempfile::Builder::new()
            .prefix(".kickstart-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| AdapterError::io("create temp file", path, e))?;

        trace!(tmp = %tmp.path().display(), target = %path.display(), "Atomic write");

        tmp.write_all(contents.as_bytes())
            .map_err(|e| AdapterError::io("write temp file", path, e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| AdapterError::io("sync temp file", path, e))?;

        if let Some(permissions) = permissions {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|e| AdapterError::io("copy permissions", path, e))?;
        }

        tmp.persist(path)
            .map_err(|e| AdapterError::io("replace file", path, e.error))?;

        Ok(())
    }
}
