//! Infrastructure adapters for wpkickstart.
//!
//! This crate implements the ports defined in
//! `kickstart-core::application::ports` and ships the built-in attachments.
//! It contains all direct I/O.

pub mod builtin_services;
pub mod error;
pub mod filesystem;
pub mod header_reader;

// Re-export commonly used adapters
pub use builtin_services::{KICKSTART_COMMAND, KickstartCommand, builtin_registry};
pub use error::AdapterError;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use header_reader::FileHeaderReader;
