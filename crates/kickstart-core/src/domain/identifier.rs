//! Class identifiers.
//!
//! A [`ClassIdentifier`] is the ordered list of namespace segments naming a
//! class, e.g. `Vendor\Plugin\Service\Example_Service`. The last segment is the
//! class itself; earlier segments may select a sub-directory.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Separators accepted by [`ClassIdentifier::parse`], tried in order.
const SEPARATORS: &[&str] = &["::", "\\", "."];

/// An immutable, non-empty sequence of non-empty name segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassIdentifier {
    segments: Vec<String>,
}

impl ClassIdentifier {
    /// Build an identifier from already-split segments.
    pub fn new<I, S>(segments: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() {
            return Err(DomainError::MalformedIdentifier {
                input: String::new(),
                reason: "identifier has no segments".into(),
            });
        }

        if let Some(pos) = segments.iter().position(|s| s.trim().is_empty()) {
            return Err(DomainError::MalformedIdentifier {
                input: segments.join("\\"),
                reason: format!("segment {pos} is empty"),
            });
        }

        Ok(Self { segments })
    }

    /// Parse a namespaced identifier.
    ///
    /// Accepts `\`, `::` or `.` as the separator (the first one present wins)
    /// and ignores a single leading separator, so `\Vendor\Foo` and
    /// `Vendor\Foo` are the same identifier.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::MalformedIdentifier {
                input: input.into(),
                reason: "identifier is empty".into(),
            });
        }

        let separator = SEPARATORS
            .iter()
            .copied()
            .find(|sep| trimmed.contains(*sep))
            .unwrap_or("\\");

        let body = trimmed.strip_prefix(separator).unwrap_or(trimmed);

        Self::new(body.split(separator)).map_err(|e| match e {
            DomainError::MalformedIdentifier { reason, .. } => DomainError::MalformedIdentifier {
                input: input.into(),
                reason,
            },
            other => other,
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segment at `index`, if present.
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// The class name (last segment).
    pub fn class_name(&self) -> &str {
        // Non-empty by construction.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// File-system slug of the class name: lower-case, `_` → `-`.
    pub fn class_slug(&self) -> String {
        slug(self.class_name())
    }

    /// Number of segments; always at least one.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

/// Lower-case a segment and replace underscores with hyphens.
pub fn slug(segment: &str) -> String {
    segment.to_lowercase().replace('_', "-")
}

impl fmt::Display for ClassIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("\\"))
    }
}

impl FromStr for ClassIdentifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
