//! `wpkickstart info`: plugin metadata and what got registered.

use serde::Serialize;

use kickstart_core::application::services::{Action, ArgSpec, StartReport, supported_phases};
use kickstart_core::prelude::*;

use crate::{
    cli::GlobalArgs,
    commands::bootstrap,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct AttachmentView {
    name: String,
    phases: Vec<Phase>,
}

#[derive(Debug, Serialize)]
struct CommandView {
    name: String,
    description: String,
    arguments: Vec<ArgSpec>,
}

#[derive(Debug, Serialize)]
struct InfoView<'a> {
    plugin: &'a AppInfo,
    attachments: Vec<AttachmentView>,
    commands: Vec<CommandView>,
    actions: &'a [Action],
    lifecycle: &'a StartReport,
}

pub fn execute(global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mut booted = bootstrap(&global, &config, &output)?;

    let attachments = booted
        .app
        .attachments_mut()
        .iter_mut()
        .map(|attachment| AttachmentView {
            name: attachment.name().to_owned(),
            phases: supported_phases(attachment.as_mut()),
        })
        .collect();

    let commands = booted
        .host
        .commands()
        .map(|command| CommandView {
            name: command.name().to_owned(),
            description: command.description().to_owned(),
            arguments: command.synopsis().to_vec(),
        })
        .collect();

    let view = InfoView {
        plugin: booted.app.info(),
        attachments,
        commands,
        actions: booted.host.actions(),
        lifecycle: &booted.start,
    };

    if output.is_json() {
        output.json(&view)?;
        return Ok(());
    }

    print_view(&view, &output)
}

fn print_view(view: &InfoView<'_>, output: &OutputManager) -> CliResult<()> {
    let plugin = view.plugin;
    let name = match plugin.header("Plugin Name") {
        "" => plugin.basename.as_str(),
        name => name,
    };

    output.header(name)?;
    output.print(&format!("  Version:   {}", display_or_dash(plugin.version())))?;
    output.print(&format!("  Basename:  {}", plugin.basename))?;
    output.print(&format!("  Path:      {}", plugin.path.display()))?;
    output.print(&format!("  URL:       {}", plugin.url))?;
    output.print(&format!("  Debug:     {}", plugin.debug))?;

    output.print("")?;
    output.header("Attachments")?;
    for attachment in &view.attachments {
        let phases: Vec<&str> = attachment.phases.iter().map(Phase::as_str).collect();
        output.print(&format!(
            "  {:<40} {}",
            attachment.name,
            display_or_dash(&phases.join(", "))
        ))?;
    }

    output.print("")?;
    output.header("Commands")?;
    for command in &view.commands {
        output.print(&format!("  {:<12} {}", command.name, command.description))?;
        for arg in &command.arguments {
            let default = arg
                .default
                .map(|value| format!(" [default: {value}]"))
                .unwrap_or_default();
            output.print(&format!("      --{:<10} {}{}", arg.name, arg.description, default))?;
        }
    }

    if !view.actions.is_empty() {
        output.print("")?;
        output.header("Actions")?;
        for action in view.actions {
            output.print(&format!(
                "  {:<12} {} (priority {})",
                action.hook, action.owner, action.priority
            ))?;
        }
    }

    Ok(())
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
