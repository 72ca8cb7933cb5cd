//! Resolver - class identifier → source file.
//!
//! Lookup order:
//! 1. Each [`PathConvention`] in priority order
//! 2. A recursive search of the fallback roots
//!
//! A miss is `None`, never an error. Every hit must canonicalize to a path
//! inside the project root; anything else is rejected and logged.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, trace, warn};

use crate::{
    application::ports::Filesystem,
    domain::{
        ClassIdentifier, DEFAULT_CONVENTIONS, FALLBACK_ROOTS, PathConvention, class_file_name,
    },
};

/// Convention-based identifier resolver bound to one project root.
pub struct Resolver {
    root: PathBuf,
    filesystem: Arc<dyn Filesystem>,
    conventions: &'static [PathConvention],
    fallback_roots: &'static [&'static str],
}

impl Resolver {
    /// Create a resolver for `root` using the default convention table.
    ///
    /// The root is canonicalized once here so that containment checks
    /// compare like with like.
    pub fn new(root: impl Into<PathBuf>, filesystem: Arc<dyn Filesystem>) -> Self {
        let root = root.into();
        let root = filesystem.canonicalize(&root).unwrap_or(root);
        Self {
            root,
            filesystem,
            conventions: DEFAULT_CONVENTIONS,
            fallback_roots: FALLBACK_ROOTS,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate paths from the convention table, in priority order.
    ///
    /// Conventions that do not apply to `identifier` (missing segment,
    /// unsafe segment) are left out.
    pub fn candidates(&self, identifier: &ClassIdentifier) -> Vec<PathBuf> {
        let file_name = match class_file_name(identifier) {
            Ok(name) => name,
            Err(e) => {
                debug!(%identifier, error = %e, "No candidates");
                return Vec::new();
            }
        };

        self.conventions
            .iter()
            .filter_map(|convention| match convention.directory(identifier) {
                Ok(Some(dir)) => Some(self.root.join(dir).join(&file_name)),
                Ok(None) => None,
                Err(e) => {
                    debug!(base = convention.base_dir, error = %e, "Convention skipped");
                    None
                }
            })
            .collect()
    }

    /// Resolve `identifier` to an existing file inside the root.
    #[instrument(skip(self), fields(identifier = %identifier))]
    pub fn resolve(&self, identifier: &ClassIdentifier) -> Option<PathBuf> {
        let file_name = match class_file_name(identifier) {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "Refusing to resolve identifier");
                return None;
            }
        };

        for candidate in self.candidates(identifier) {
            trace!(candidate = %candidate.display(), "Trying convention");
            if self.filesystem.is_file(&candidate) {
                if let Some(path) = self.contain(&candidate) {
                    debug!(path = %path.display(), "Resolved by convention");
                    return Some(path);
                }
            }
        }

        let found = self.search_fallback(&file_name);
        match &found {
            Some(path) => debug!(path = %path.display(), "Resolved by recursive search"),
            None => debug!("Not found"),
        }
        found
    }

    /// Parse and resolve. A malformed identifier is treated as a miss.
    pub fn resolve_str(&self, input: &str) -> Option<PathBuf> {
        match ClassIdentifier::parse(input) {
            Ok(identifier) => self.resolve(&identifier),
            Err(e) => {
                warn!(input, error = %e, "Malformed identifier");
                None
            }
        }
    }

    fn search_fallback(&self, file_name: &str) -> Option<PathBuf> {
        let wanted = OsStr::new(file_name);

        for dir in self.fallback_roots {
            let base = self.root.join(dir);
            if !self.filesystem.is_dir(&base) {
                continue;
            }

            for entry in self.filesystem.walk(&base) {
                let path = match entry {
                    Ok(path) => path,
                    Err(e) => {
                        debug!(error = %e, "Skipping unreadable entry");
                        continue;
                    }
                };

                if path.file_name() != Some(wanted) {
                    continue;
                }

                if let Some(path) = self.contain(&path) {
                    return Some(path);
                }
            }
        }

        None
    }

    /// Canonical form of `path` if it lies inside the root.
    fn contain(&self, path: &Path) -> Option<PathBuf> {
        match self.filesystem.canonicalize(path) {
            Ok(canonical) if canonical.starts_with(&self.root) => Some(canonical),
            Ok(canonical) => {
                warn!(
                    path = %canonical.display(),
                    root = %self.root.display(),
                    "Rejected path outside the project root"
                );
                None
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Could not canonicalize");
                None
            }
        }
    }
}
