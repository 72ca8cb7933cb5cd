//! Driven (output) ports - implemented by infrastructure.
//!
//! The `kickstart-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::PluginHeaders;
use crate::error::KickstartResult;

/// Lazy sequence of files produced by [`Filesystem::walk`].
pub type FileWalk<'a> = Box<dyn Iterator<Item = KickstartResult<PathBuf>> + 'a>;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kickstart_adapters::filesystem::LocalFilesystem` (production)
/// - `kickstart_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// `true` if `path` is an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// `true` if `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Absolute path with `.`/`..` and symlinks resolved. Fails when the
    /// path does not exist.
    fn canonicalize(&self, path: &Path) -> KickstartResult<PathBuf>;

    /// Every regular file below `root`, recursively.
    ///
    /// Directories are never yielded. Problems with individual entries
    /// (permissions, symlink loops) are yielded as errors and the walk
    /// carries on with the next entry.
    fn walk(&self, root: &Path) -> FileWalk<'_>;

    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> KickstartResult<String>;

    /// Replace a file's content in one step: readers see either the old or
    /// the new content, never a mix.
    fn write_atomic(&self, path: &Path, contents: &str) -> KickstartResult<()>;
}

/// Port for reading plugin header metadata.
#[cfg_attr(test, mockall::automock)]
pub trait HeaderReader: Send + Sync {
    /// Read the standard plugin headers from the main plugin file.
    fn read_headers(&self, plugin_file: &Path) -> KickstartResult<PluginHeaders>;
}
