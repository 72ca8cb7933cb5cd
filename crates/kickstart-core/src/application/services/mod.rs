//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use cases: resolve an identifier, rewrite a project tree,
//! broadcast a lifecycle phase and bootstrap the plugin application.

pub mod host;
pub mod lifecycle;
pub mod plugin_app;
pub mod resolver;
pub mod rewrite_engine;

pub use host::{Action, ArgSpec, Command, CommandArgs, CommandOutcome, Host};
pub use lifecycle::{
    Attachment, DispatchFailure, DispatchReport, LifecycleDispatcher, OnDeactivate, OnHooks,
    OnRun, supported_phases,
};
pub use plugin_app::{
    AppInfo, AppOptions, AppState, Application, AttachContext, AttachmentFactory,
    AttachmentRegistry, DEFAULT_BASE_URL, StartReport,
};
pub use resolver::Resolver;
pub use rewrite_engine::RewriteEngine;
