//! Command handlers.
//!
//! Each submodule exposes an `execute` function called from `main::run`.
//! Plugin-backed commands share [`bootstrap`], which builds the
//! [`Application`] from the flags and config and starts it.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, instrument};

use kickstart_adapters::{FileHeaderReader, LocalFilesystem, builtin_registry};
use kickstart_core::application::services::{DispatchReport, StartReport};
use kickstart_core::prelude::*;

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub mod completions;
pub mod config;
pub mod deactivate;
pub mod info;
pub mod init;
pub mod kickstart;
pub mod resolve;

/// A started application plus the host it registered with.
pub struct Bootstrapped {
    pub app: Application,
    pub host: Host,
    pub start: StartReport,
}

/// The main plugin file: `--plugin-file` wins over `plugin.file`.
pub fn plugin_file(global: &GlobalArgs, config: &AppConfig) -> CliResult<PathBuf> {
    global
        .plugin_file
        .clone()
        .or_else(|| config.plugin.file.clone())
        .ok_or(CliError::PluginFileMissing)
}

/// Construct the application without attaching anything.
pub fn open(global: &GlobalArgs, config: &AppConfig) -> CliResult<Application> {
    let plugin_file = plugin_file(global, config)?;
    debug!(plugin_file = %plugin_file.display(), "Opening plugin");

    let options = AppOptions {
        base_url: config.plugin.base_url.clone(),
        debug: config.plugin.debug,
    };

    Ok(Application::new(
        plugin_file,
        options,
        Arc::new(LocalFilesystem::new()),
        &FileHeaderReader::new(),
    )?)
}

/// Construct and start the application with the built-in attachments.
#[instrument(skip_all)]
pub fn bootstrap(
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<Bootstrapped> {
    let mut app = open(global, config)?;
    let mut host = Host::new();

    let start = app
        .start(&builtin_registry(), &mut host)
        .ok_or_else(|| KickstartError::Internal {
            message: "application was already running".into(),
        })?;

    report_dispatch(&start.hooks, output)?;
    report_dispatch(&start.run, output)?;

    Ok(Bootstrapped { app, host, start })
}

/// Surface attachment failures as warnings; dispatch carries on past them.
pub fn report_dispatch(report: &DispatchReport, output: &OutputManager) -> CliResult<()> {
    for failure in &report.failures {
        output.warning(&format!(
            "{} failed during {}: {}",
            failure.attachment, report.phase, failure.reason
        ))?;
    }
    Ok(())
}
