//! `wpkickstart deactivate`: broadcast the deactivate phase.

use tracing::instrument;

use crate::{
    cli::GlobalArgs,
    commands::{bootstrap, report_dispatch},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mut booted = bootstrap(&global, &config, &output)?;
    let report = booted.app.deactivate(&mut booted.host);

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    report_dispatch(&report, &output)?;
    for name in &report.invoked {
        output.print(&format!("  deactivated  {name}"))?;
    }
    output.success(&format!(
        "Deactivated {} attachment(s), {} without a deactivate step",
        report.invoked.len(),
        report.skipped.len()
    ))?;

    Ok(())
}
