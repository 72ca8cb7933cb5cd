//! Application layer for wpkickstart.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (Resolver, RewriteEngine,
//!   LifecycleDispatcher, Application, Host)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Naming and removal rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AppInfo, AppOptions, Application, Attachment, AttachmentRegistry, Command, CommandArgs,
    CommandOutcome, Host, LifecycleDispatcher, Resolver, RewriteEngine,
};

// Re-export port traits (for adapter implementation)
pub use ports::{FileWalk, Filesystem, HeaderReader};

pub use error::ApplicationError;
