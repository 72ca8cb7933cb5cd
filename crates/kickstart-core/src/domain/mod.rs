//! Core domain layer for wpkickstart.
//!
//! Pure logic with no I/O: identifiers, naming conventions, removal rules,
//! file filters, lifecycle phases and plugin header types. Everything that
//! touches the filesystem goes through the ports in `crate::application`.

pub mod convention;
pub mod error;
pub mod header;
pub mod identifier;
pub mod phase;
pub mod rewrite;

pub use convention::{
    CLASS_FILE_EXTENSION, CLASS_FILE_PREFIX, DEFAULT_CONVENTIONS, FALLBACK_ROOTS, PathConvention,
    SubdirRule, class_file_name, safe_component,
};
pub use error::{DomainError, ErrorCategory};
pub use header::{PLUGIN_HEADER_KEYS, PluginHeaders, header_value};
pub use identifier::{ClassIdentifier, slug};
pub use phase::Phase;
pub use rewrite::{
    BUILTIN_EXTENSIONS, BUILTIN_IGNORE_DIRS, BUILTIN_REMOVALS, DEFAULT_SINCE, FileFilter,
    RemovalRule, RewriteFailure, RewriteReport, apply_rules,
};
