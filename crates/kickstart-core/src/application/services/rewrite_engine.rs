//! Rewrite Engine - bulk literal removal over a project tree.
//!
//! Workflow per file:
//! 1. Filter by extension and ignored directories
//! 2. Confirm the file is inside the root after canonicalization, and that
//!    the resolved path passes the same filter
//! 3. Read, apply every rule in order
//! 4. Write back atomically, only when something was removed
//!
//! A file that cannot be read or written is logged, recorded in the report
//! and skipped. The walk always runs to the end.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{FileFilter, RemovalRule, RewriteReport, apply_rules},
    error::KickstartResult,
};

/// Outcome for a single file.
enum FileOutcome {
    Modified(usize),
    Unchanged,
}

/// Applies removal rules to every eligible file under a root.
pub struct RewriteEngine {
    filesystem: Arc<dyn Filesystem>,
}

impl RewriteEngine {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Rewrite every eligible file under `root`.
    ///
    /// Fails only when `root` is not a directory. Per-file problems end up in
    /// [`RewriteReport::failures`].
    #[instrument(skip_all, fields(root = %root.as_ref().display(), rules = rules.len()))]
    pub fn rewrite(
        &self,
        root: impl AsRef<Path>,
        rules: &[RemovalRule],
        filter: &FileFilter,
    ) -> KickstartResult<RewriteReport> {
        let root = root.as_ref();

        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::NotADirectory {
                path: root.to_path_buf(),
            }
            .into());
        }

        let canonical_root = self.filesystem.canonicalize(root)?;
        let mut report = RewriteReport::default();

        for entry in self.filesystem.walk(root) {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    let failed = e.path().unwrap_or(root).to_path_buf();
                    warn!(path = %failed.display(), error = %e, "Walk error");
                    report.record_failure(failed, e.to_string());
                    continue;
                }
            };

            report.scanned += 1;

            let relative = path.strip_prefix(root).unwrap_or(&path);

            if !filter.allows_extension(relative) {
                report.skipped_extension += 1;
                continue;
            }

            if filter.is_ignored(relative) {
                debug!(path = %relative.display(), "Ignored directory");
                report.skipped_ignored += 1;
                continue;
            }

            let target = match self.in_tree(&path, &canonical_root) {
                Ok(Some(target)) => target,
                Ok(None) => {
                    report.skipped_outside_root += 1;
                    continue;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Could not canonicalize");
                    report.record_failure(path, e.to_string());
                    continue;
                }
            };

            // A link inside the tree may point into an ignored directory.
            let resolved = target.strip_prefix(&canonical_root).unwrap_or(&target);
            if filter.is_ignored(resolved) || !filter.allows_extension(resolved) {
                debug!(
                    path = %path.display(),
                    target = %resolved.display(),
                    "Link target is not eligible"
                );
                report.skipped_ignored += 1;
                continue;
            }

            match self.rewrite_file(&target, rules) {
                Ok(FileOutcome::Modified(removed)) => {
                    debug!(path = %path.display(), removed, "Rewrote file");
                    report.record_modified(path, removed);
                }
                Ok(FileOutcome::Unchanged) => report.unchanged += 1,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping file");
                    report.record_failure(path, e.to_string());
                }
            }
        }

        info!(
            scanned = report.scanned,
            modified = report.files_modified(),
            removed = report.occurrences_removed,
            failures = report.failures.len(),
            "Rewrite finished"
        );

        Ok(report)
    }

    fn in_tree(&self, path: &Path, canonical_root: &Path) -> KickstartResult<Option<PathBuf>> {
        let canonical = self.filesystem.canonicalize(path)?;
        if canonical.starts_with(canonical_root) {
            Ok(Some(canonical))
        } else {
            warn!(
                path = %path.display(),
                target = %canonical.display(),
                "Skipping file that resolves outside the root"
            );
            Ok(None)
        }
    }

    fn rewrite_file(&self, path: &Path, rules: &[RemovalRule]) -> KickstartResult<FileOutcome> {
        let original = self.filesystem.read_to_string(path)?;
        let (rewritten, removed) = apply_rules(&original, rules);

        if removed == 0 {
            return Ok(FileOutcome::Unchanged);
        }

        self.filesystem.write_atomic(path, &rewritten)?;
        Ok(FileOutcome::Modified(removed))
    }
}
