//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Component, Path, PathBuf},
    sync::{
        Arc, RwLock,
        atomic::{AtomicUsize, Ordering},
    },
};

use kickstart_core::{
    application::{
        ApplicationError,
        ports::{FileWalk, Filesystem},
    },
    error::{KickstartError, KickstartResult},
};

/// Symlink hops followed before giving up.
const MAX_LINK_DEPTH: usize = 8;

/// In-memory filesystem for testing.
///
/// Paths are normalized lexically. Symlinks are modelled as a path → target
/// table and resolved by [`Filesystem::canonicalize`]. Individual files can be
/// made unreadable or unwritable to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
    writes: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    links: BTreeMap<PathBuf, PathBuf>,
    deny_read: BTreeSet<PathBuf>,
    deny_write: BTreeSet<PathBuf>,
    broken: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<String>) -> &Self {
        let path = normalize(path.as_ref());
        if let Ok(mut inner) = self.inner.write() {
            inner.add_parents(&path);
            inner.files.insert(path, contents.into());
        }
        self
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let path = normalize(path.as_ref());
        if let Ok(mut inner) = self.inner.write() {
            inner.add_parents(&path);
            inner.directories.insert(path);
        }
        self
    }

    /// Add a symlink at `link` pointing to `target` (absolute).
    pub fn add_symlink(&self, link: impl AsRef<Path>, target: impl AsRef<Path>) -> &Self {
        let link = normalize(link.as_ref());
        if let Ok(mut inner) = self.inner.write() {
            inner.add_parents(&link);
            inner.links.insert(link, normalize(target.as_ref()));
        }
        self
    }

    /// Make reads of `path` fail.
    pub fn deny_read(&self, path: impl AsRef<Path>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.deny_read.insert(normalize(path.as_ref()));
        }
        self
    }

    /// Make writes to `path` fail.
    pub fn deny_write(&self, path: impl AsRef<Path>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.deny_write.insert(normalize(path.as_ref()));
        }
        self
    }

    /// Make the walker yield an error for `path`.
    pub fn add_broken_entry(&self, path: impl AsRef<Path>) -> &Self {
        let path = normalize(path.as_ref());
        if let Ok(mut inner) = self.inner.write() {
            inner.add_parents(&path);
            inner.broken.insert(path);
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(&normalize(path.as_ref())).cloned()
    }

    /// Number of successful `write_atomic` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock_read(&self) -> KickstartResult<std::sync::RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| ApplicationError::LockPoisoned.into())
    }
}

impl MemoryFilesystemInner {
    fn add_parents(&mut self, path: &Path) {
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.directories.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }

    /// Follow symlinks on every prefix of `path`.
    fn resolve(&self, path: &Path) -> Option<PathBuf> {
        let mut resolved = normalize(path);

        for _ in 0..MAX_LINK_DEPTH {
            let hit = resolved.ancestors().find_map(|prefix| {
                self.links
                    .get(prefix)
                    .map(|target| (prefix.to_path_buf(), target.clone()))
            });

            let Some((link, target)) = hit else {
                return Some(resolved);
            };

            let rest = resolved.strip_prefix(&link).ok()?.to_path_buf();
            resolved = normalize(&target.join(rest));
        }

        None
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }
}

impl Filesystem for MemoryFilesystem {
    fn is_file(&self, path: &Path) -> bool {
        self.inner
            .read()
            .ok()
            .and_then(|inner| inner.resolve(path).map(|p| inner.files.contains_key(&p)))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .ok()
            .and_then(|inner| inner.resolve(path).map(|p| inner.directories.contains(&p)))
            .unwrap_or(false)
    }

    fn canonicalize(&self, path: &Path) -> KickstartResult<PathBuf> {
        let inner = self.lock_read()?;
        match inner.resolve(path) {
            Some(resolved) if inner.exists(&resolved) => Ok(resolved),
            Some(_) => Err(filesystem_error(path, "No such file or directory")),
            None => Err(filesystem_error(path, "Too many levels of symbolic links")),
        }
    }

    /// Lexicographic order. Symlinks to files are yielded under their link
    /// path.
    fn walk(&self, root: &Path) -> FileWalk<'_> {
        let root = normalize(root);
        let entries: Vec<KickstartResult<PathBuf>> = match self.inner.read() {
            Ok(inner) => {
                let mut paths: BTreeMap<PathBuf, bool> = BTreeMap::new();
                for file in inner.files.keys().filter(|p| p.starts_with(&root)) {
                    paths.insert(file.clone(), true);
                }
                for (link, _) in inner.links.iter().filter(|(p, _)| p.starts_with(&root)) {
                    let is_file = inner
                        .resolve(link)
                        .is_some_and(|target| inner.files.contains_key(&target));
                    if is_file {
                        paths.insert(link.clone(), true);
                    }
                }
                for broken in inner.broken.iter().filter(|p| p.starts_with(&root)) {
                    paths.insert(broken.clone(), false);
                }
                paths
                    .into_iter()
                    .map(|(path, ok)| {
                        if ok {
                            Ok(path)
                        } else {
                            Err(filesystem_error(&path, "Permission denied (os error 13)"))
                        }
                    })
                    .collect()
            }
            Err(_) => vec![Err(ApplicationError::LockPoisoned.into())],
        };
        Box::new(entries.into_iter())
    }

    fn read_to_string(&self, path: &Path) -> KickstartResult<String> {
        let inner = self.lock_read()?;
        let resolved = inner
            .resolve(path)
            .ok_or_else(|| filesystem_error(path, "Too many levels of symbolic links"))?;

        if inner.deny_read.contains(&normalize(path)) || inner.deny_read.contains(&resolved) {
            return Err(filesystem_error(path, "Failed to read file: Permission denied"));
        }

        inner
            .files
            .get(&resolved)
            .cloned()
            .ok_or_else(|| filesystem_error(path, "No such file or directory"))
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> KickstartResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        let resolved = inner
            .resolve(path)
            .ok_or_else(|| filesystem_error(path, "Too many levels of symbolic links"))?;

        if inner.deny_write.contains(&normalize(path)) || inner.deny_write.contains(&resolved) {
            return Err(filesystem_error(path, "Failed to write file: Permission denied"));
        }

        if let Some(parent) = resolved.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(filesystem_error(path, "Parent directory does not exist"));
            }
        }

        inner.files.insert(resolved, contents.to_owned());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Resolve `.` and `..` without touching any filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn filesystem_error(path: &Path, reason: &str) -> KickstartError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}
