//! `wpkickstart kickstart`: strip the example scaffolding from the plugin.

use std::path::Path;

use tracing::{info, instrument};

use kickstart_adapters::KICKSTART_COMMAND;
use kickstart_core::prelude::*;

use crate::{
    cli::{GlobalArgs, KickstartArgs},
    commands::bootstrap,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Invoke the `kickstart` host command registered by the Replace CLI service.
#[instrument(skip_all)]
pub fn execute(
    args: KickstartArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let booted = bootstrap(&global, &config, &output)?;
    let root = booted.app.info().path.clone();

    if !args.yes && !output.is_quiet() && !output.is_json() {
        output.info(&format!(
            "This removes the example scaffolding from every eligible file under {}",
            root.display()
        ))?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let mut command_args = CommandArgs::new();
    if let Some(since) = args.since {
        command_args = command_args.with("since", since);
    }

    let outcome = booted
        .host
        .invoke(KICKSTART_COMMAND, booted.app.info(), command_args)?;
    let report = outcome.report.clone().unwrap_or_default();

    if output.is_json() {
        output.json(&outcome)?;
    } else {
        print_report(&outcome.summary, &report, &root, &output)?;
    }

    if report.has_failures() {
        return Err(CliError::PartialRewrite {
            failures: report.failures.len(),
        });
    }

    info!(modified = report.files_modified(), "Kickstart finished");
    Ok(())
}

fn print_report(
    summary: &str,
    report: &RewriteReport,
    root: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    for path in &report.modified {
        output.print(&format!("  modified  {}", display_relative(path, root)))?;
    }

    for failure in &report.failures {
        output.error(&format!(
            "{}: {}",
            display_relative(&failure.path, root),
            failure.reason
        ))?;
    }

    if report.has_failures() {
        output.warning(summary)?;
    } else {
        output.success(summary)?;
    }

    output.print(&format!(
        "  scanned {}, unchanged {}, skipped {} by extension, {} ignored, {} outside the plugin",
        report.scanned,
        report.unchanged,
        report.skipped_extension,
        report.skipped_ignored,
        report.skipped_outside_root,
    ))?;

    Ok(())
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Ask before touching files. Uses a dialoguer prompt on a terminal.
fn confirm() -> CliResult<bool> {
    #[cfg(feature = "interactive")]
    {
        use std::io::IsTerminal;

        if std::io::stdin().is_terminal() {
            return dialoguer::Confirm::new()
                .with_prompt("Continue?")
                .default(true)
                .interact()
                .map_err(|e| CliError::InvalidInput {
                    message: "failed to read confirmation".into(),
                    source: Some(Box::new(e)),
                });
        }
    }

    confirm_line(std::io::stdin().lock())
}

fn confirm_line(mut input: impl std::io::BufRead) -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(|e| CliError::IoError {
        message: "failed to read confirmation input".into(),
        source: e,
    })?;

    // Closed stdin is not consent.
    if read == 0 {
        return Ok(false);
    }

    let line = line.trim().to_ascii_lowercase();
    Ok(line.is_empty() || line == "y" || line == "yes")
}
