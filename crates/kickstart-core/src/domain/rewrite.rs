//! Literal removal rules, file filters and rewrite reports.
//!
//! # Removal policy
//!
//! The built-in rule set is **line-exact**: every rule includes its trailing
//! `\n`, so only whole lines disappear. [`RemovalRule::literal`] is available
//! for raw substring removal. The built-in filter skips `vendor/` (plus
//! `node_modules/` and `.git/`).

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// Default value of the `kickstart --since` argument.
pub const DEFAULT_SINCE: &str = "1.0.0";

/// A literal text fragment deleted wherever it occurs verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RemovalRule {
    text: Cow<'static, str>,
}

impl RemovalRule {
    /// Rule for a compile-time literal, used as-is.
    pub const fn from_static(text: &'static str) -> Self {
        Self {
            text: Cow::Borrowed(text),
        }
    }

    /// Remove a whole line. A trailing `\n` is appended when missing.
    pub fn line(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Self {
            text: Cow::Owned(text),
        }
    }

    /// Remove an arbitrary substring.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: Cow::Owned(text.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Remove every occurrence of this rule from `text`.
    ///
    /// Returns the rewritten text and how many occurrences were removed. An
    /// empty rule never matches.
    pub fn apply(&self, text: &str) -> (String, usize) {
        if self.text.is_empty() {
            return (text.to_owned(), 0);
        }
        let count = text.matches(self.as_str()).count();
        if count == 0 {
            return (text.to_owned(), 0);
        }
        (text.replace(self.as_str(), ""), count)
    }
}

/// Apply `rules` in order. Returns the final text and total removals.
pub fn apply_rules(text: &str, rules: &[RemovalRule]) -> (String, usize) {
    rules
        .iter()
        .fold((text.to_owned(), 0), |(current, total), rule| {
            let (next, removed) = rule.apply(&current);
            (next, total + removed)
        })
}

/// Lines the `kickstart` command strips from a fresh project.
pub const BUILTIN_REMOVALS: &[RemovalRule] = &[
    RemovalRule::from_static(
        "\t\t// An example service so you can see how things work, below cli command should remove this.\n",
    ),
    RemovalRule::from_static("\t\t$this->example_service = new Service\\Example_Service();\n"),
];

/// Extensions the `kickstart` command rewrites.
pub const BUILTIN_EXTENSIONS: &[&str] = &["php", "md", "js"];

/// Directories the `kickstart` command never enters.
pub const BUILTIN_IGNORE_DIRS: &[&str] = &["vendor", "node_modules", ".git"];

/// Extension allow-list plus directory deny-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFilter {
    extensions: Vec<String>,
    ignore_dirs: Vec<String>,
}

impl FileFilter {
    /// Build a filter. Extensions may be given with or without a leading dot
    /// and are matched case-insensitively. An empty extension list allows
    /// every file.
    pub fn new<E, D>(extensions: E, ignore_dirs: D) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
            ignore_dirs: ignore_dirs
                .into_iter()
                .map(|d| d.as_ref().trim_matches(['/', '\\']).to_owned())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// The filter used by `kickstart`.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_EXTENSIONS, BUILTIN_IGNORE_DIRS)
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn ignore_dirs(&self) -> &[String] {
        &self.ignore_dirs
    }

    /// `true` if the file's extension is on the allow-list.
    pub fn allows_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(OsStr::to_str)
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            })
            .unwrap_or(false)
    }

    /// `true` if any directory component of `relative` is on the deny-list.
    ///
    /// `relative` should be relative to the walk root so that the root's own
    /// location never triggers a match. The file name itself is not checked.
    pub fn is_ignored(&self, relative: &Path) -> bool {
        let Some(parent) = relative.parent() else {
            return false;
        };
        parent.components().any(|component| match component {
            Component::Normal(name) => name
                .to_str()
                .is_some_and(|name| self.ignore_dirs.iter().any(|d| d == name)),
            _ => false,
        })
    }

    /// Extension and directory checks together.
    pub fn accepts(&self, relative: &Path) -> bool {
        self.allows_extension(relative) && !self.is_ignored(relative)
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A file the rewrite could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one rewrite pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    /// Files produced by the walker.
    pub scanned: usize,
    /// Files whose content changed and was written back.
    pub modified: Vec<PathBuf>,
    /// Eligible files that contained none of the rules.
    pub unchanged: usize,
    pub skipped_extension: usize,
    pub skipped_ignored: usize,
    pub skipped_outside_root: usize,
    /// Total occurrences removed across all files.
    pub occurrences_removed: usize,
    pub failures: Vec<RewriteFailure>,
}

impl RewriteReport {
    pub fn files_modified(&self) -> usize {
        self.modified.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn record_modified(&mut self, path: PathBuf, removed: usize) {
        self.occurrences_removed += removed;
        self.modified.push(path);
    }

    pub fn record_failure(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.failures.push(RewriteFailure {
            path,
            reason: reason.into(),
        });
    }
}
