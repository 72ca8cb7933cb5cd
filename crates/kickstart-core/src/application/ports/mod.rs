//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world.
//! Adapters in `kickstart-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: existence checks, recursive walk, read, atomic write
//!   - `HeaderReader`: plugin header metadata
//!
//! - **Driving (Input) Ports**: `Command`s registered with the `Host` by
//!   attachments and invoked by the CLI.

pub mod output;

pub use output::{FileWalk, Filesystem, HeaderReader};

#[cfg(test)]
pub use output::MockHeaderReader;
