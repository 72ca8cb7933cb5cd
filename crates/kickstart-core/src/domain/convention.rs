//! Directory conventions used to locate a class file.
//!
//! # Design
//!
//! Pure functions and `const` tables only. Turning a convention into a real
//! path and checking it on disk is the resolver's job
//! (`application::services::resolver`).
//!
//! Two layouts coexist: the current one keys `components/` and `services/`
//! sub-directories by the class slug, the legacy one keys them by the third
//! namespace segment and keeps shared classes in `includes/`.

use std::path::{Component, Path, PathBuf};

use crate::domain::{
    error::DomainError,
    identifier::{ClassIdentifier, slug},
};

/// Prefix of every class file name.
pub const CLASS_FILE_PREFIX: &str = "class-";

/// Extension of every class file name (no leading dot).
pub const CLASS_FILE_EXTENSION: &str = "php";

/// How a convention derives its sub-directory from an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdirRule {
    /// Files live directly in the base directory.
    None,
    /// `<base>/<class-slug>/`.
    ClassSlug,
    /// `<base>/<slug of segment N>/`; skipped when the segment is absent.
    Segment(usize),
}

/// One `(base directory, sub-directory rule)` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathConvention {
    pub base_dir: &'static str,
    pub subdir: SubdirRule,
}

impl PathConvention {
    pub const fn new(base_dir: &'static str, subdir: SubdirRule) -> Self {
        Self { base_dir, subdir }
    }

    /// Directory (relative to the project root) this convention points at
    /// for `identifier`.
    ///
    /// Returns `Ok(None)` when the rule needs a segment the identifier does
    /// not have, and an error when the derived sub-directory is not a single
    /// plain path component.
    pub fn directory(&self, identifier: &ClassIdentifier) -> Result<Option<PathBuf>, DomainError> {
        let base = PathBuf::from(self.base_dir);

        let subdir = match self.subdir {
            SubdirRule::None => return Ok(Some(base)),
            SubdirRule::ClassSlug => identifier.class_slug(),
            SubdirRule::Segment(index) => match identifier.segment(index) {
                Some(segment) => slug(segment),
                None => return Ok(None),
            },
        };

        Ok(Some(base.join(safe_component(&subdir)?)))
    }
}

/// Lookup order, highest priority first.
pub const DEFAULT_CONVENTIONS: &[PathConvention] = &[
    PathConvention::new("app", SubdirRule::None),
    PathConvention::new("includes", SubdirRule::None),
    PathConvention::new("components", SubdirRule::ClassSlug),
    PathConvention::new("components", SubdirRule::Segment(2)),
    PathConvention::new("services", SubdirRule::ClassSlug),
    // Kept for plugins generated before services/ was introduced.
    PathConvention::new("features", SubdirRule::ClassSlug),
    PathConvention::new("services", SubdirRule::Segment(2)),
];

/// Directories searched recursively when no convention matches.
pub const FALLBACK_ROOTS: &[&str] = &["app", "components", "services"];

/// Canonical file name for an identifier, e.g. `class-replace-cli.php`.
pub fn class_file_name(identifier: &ClassIdentifier) -> Result<String, DomainError> {
    let name = format!(
        "{CLASS_FILE_PREFIX}{}.{CLASS_FILE_EXTENSION}",
        identifier.class_slug()
    );
    safe_component(&name)?;
    Ok(name)
}

/// Ensure `value` is exactly one normal path component.
///
/// Rejects separators, `.`/`..`, NUL bytes and anything `Path` would parse
/// as a root or prefix. This keeps crafted identifiers from walking out of
/// the project tree before anything touches the filesystem.
pub fn safe_component(value: &str) -> Result<&str, DomainError> {
    let unsafe_segment = || DomainError::UnsafeSegment {
        segment: value.into(),
    };

    if value.is_empty() || value.contains(['/', '\\', '\0']) {
        return Err(unsafe_segment());
    }

    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(value),
        _ => Err(unsafe_segment()),
    }
}
