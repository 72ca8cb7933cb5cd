//! wpkickstart Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for wpkickstart,
//! a plugin scaffold that resolves class files by naming convention, runs a
//! small lifecycle over its attachments and rewrites a template project into
//! a concrete one.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         kickstart-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Application, Resolver, RewriteEngine, │
//! │   LifecycleDispatcher, Host)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │      (Filesystem, HeaderReader)         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    kickstart-adapters (Infrastructure)  │
//! │ (LocalFilesystem, FileHeaderReader, ...)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ClassIdentifier, PathConvention,       │
//! │  RemovalRule, FileFilter, Phase)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kickstart_core::prelude::*;
//!
//! // `filesystem` and `reader` come from kickstart-adapters.
//! let mut app = Application::new("my-plugin/my-plugin.php", AppOptions::default(), filesystem, &reader)?;
//! let mut host = Host::new();
//! app.start(&registry, &mut host);
//! host.invoke("kickstart", app.info(), CommandArgs::new())?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AppInfo, AppOptions, Application, Attachment, AttachmentRegistry, Command, CommandArgs,
        CommandOutcome, Host, LifecycleDispatcher, Resolver, RewriteEngine,
        ports::{Filesystem, HeaderReader},
    };
    pub use crate::domain::{
        ClassIdentifier, FileFilter, Phase, PluginHeaders, RemovalRule, RewriteReport,
    };
    pub use crate::error::{KickstartError, KickstartResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
