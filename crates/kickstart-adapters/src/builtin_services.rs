//! Built-in attachments.
//!
//! The stock plugin ships three attachments, registered in this order:
//!
//! | Identifier                                  | Phases               |
//! |---------------------------------------------|----------------------|
//! | `Kickstart\Plugin\Shared`                   | none                 |
//! | `Kickstart\Plugin\Service\Example_Service`  | hooks, deactivate    |
//! | `Kickstart\Plugin\Service\Replace_CLI`      | run                  |
//!
//! `Replace_CLI` registers the `kickstart` command, which strips the example
//! wiring from a freshly generated plugin.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use kickstart_core::{
    application::{
        ports::Filesystem,
        services::{
            AppInfo, ArgSpec, AttachContext, Attachment, AttachmentFactory, AttachmentRegistry,
            Command, CommandArgs, CommandOutcome, Host, OnDeactivate, OnHooks, OnRun,
            RewriteEngine,
        },
    },
    domain::{BUILTIN_REMOVALS, ClassIdentifier, DEFAULT_SINCE, FileFilter, RemovalRule},
    error::KickstartResult,
};

pub const SHARED_ID: &str = "Kickstart\\Plugin\\Shared";
pub const EXAMPLE_SERVICE_ID: &str = "Kickstart\\Plugin\\Service\\Example_Service";
pub const REPLACE_CLI_ID: &str = "Kickstart\\Plugin\\Service\\Replace_CLI";

/// Name the rewrite command is registered under.
pub const KICKSTART_COMMAND: &str = "kickstart";

/// Hook the example service subscribes to.
pub const EXAMPLE_HOOK: &str = "init";

/// Shared helpers. Attached for lookup only.
pub struct Shared;

impl Attachment for Shared {
    fn name(&self) -> &str {
        SHARED_ID
    }
}

/// Demonstrates the lifecycle. Removed from real plugins by `kickstart`.
pub struct ExampleService {
    plugin: String,
}

impl ExampleService {
    pub fn new(info: &AppInfo) -> Self {
        Self {
            plugin: info.basename.clone(),
        }
    }
}

impl OnHooks for ExampleService {
    fn hooks(&mut self, host: &mut Host) -> KickstartResult<()> {
        host.add_action(EXAMPLE_HOOK, EXAMPLE_SERVICE_ID, 10);
        Ok(())
    }
}

impl OnDeactivate for ExampleService {
    fn deactivate(&mut self, _host: &mut Host) -> KickstartResult<()> {
        info!(plugin = %self.plugin, "Example service deactivated");
        Ok(())
    }
}

impl Attachment for ExampleService {
    fn name(&self) -> &str {
        EXAMPLE_SERVICE_ID
    }

    fn as_hooks(&mut self) -> Option<&mut dyn OnHooks> {
        Some(self)
    }

    fn as_deactivate(&mut self) -> Option<&mut dyn OnDeactivate> {
        Some(self)
    }
}

/// Registers the `kickstart` command during `run`.
pub struct ReplaceCli {
    filesystem: Arc<dyn Filesystem>,
}

impl ReplaceCli {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }
}

impl OnRun for ReplaceCli {
    fn run(&mut self, host: &mut Host) -> KickstartResult<()> {
        let command = KickstartCommand::new(Arc::clone(&self.filesystem));
        host.add_command(Box::new(command));
        Ok(())
    }
}

impl Attachment for ReplaceCli {
    fn name(&self) -> &str {
        REPLACE_CLI_ID
    }

    fn as_run(&mut self) -> Option<&mut dyn OnRun> {
        Some(self)
    }
}

const KICKSTART_SYNOPSIS: &[ArgSpec] = &[ArgSpec {
    name: "since",
    description: "Version the project starts from",
    default: Some(DEFAULT_SINCE),
    optional: true,
}];

/// Strips the boilerplate lines from every eligible file in the plugin.
pub struct KickstartCommand {
    engine: RewriteEngine,
    rules: Vec<RemovalRule>,
    filter: FileFilter,
}

impl KickstartCommand {
    /// Command with the built-in removal rules and file filter.
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self::with_rules(filesystem, BUILTIN_REMOVALS.to_vec(), FileFilter::builtin())
    }

    pub fn with_rules(
        filesystem: Arc<dyn Filesystem>,
        rules: Vec<RemovalRule>,
        filter: FileFilter,
    ) -> Self {
        Self {
            engine: RewriteEngine::new(filesystem),
            rules,
            filter,
        }
    }

    pub fn rules(&self) -> &[RemovalRule] {
        &self.rules
    }

    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }
}

impl Command for KickstartCommand {
    fn name(&self) -> &str {
        KICKSTART_COMMAND
    }

    fn description(&self) -> &str {
        "Remove the example scaffolding from the plugin"
    }

    fn synopsis(&self) -> &[ArgSpec] {
        KICKSTART_SYNOPSIS
    }

    #[instrument(skip_all, fields(root = %app.path.display()))]
    fn invoke(&self, app: &AppInfo, args: &CommandArgs) -> KickstartResult<CommandOutcome> {
        let since = args.get("since").unwrap_or(DEFAULT_SINCE);
        debug!(since, "Kickstarting");

        let report = self.engine.rewrite(&app.path, &self.rules, &self.filter)?;

        let summary = format!(
            "Removed {} line(s) from {} file(s)",
            report.occurrences_removed,
            report.files_modified()
        );

        Ok(CommandOutcome {
            summary,
            args: args.named.clone(),
            report: Some(report),
        })
    }
}

fn shared(_: &AttachContext<'_>) -> Box<dyn Attachment> {
    Box::new(Shared)
}

fn example_service(ctx: &AttachContext<'_>) -> Box<dyn Attachment> {
    Box::new(ExampleService::new(ctx.info))
}

fn replace_cli(ctx: &AttachContext<'_>) -> Box<dyn Attachment> {
    Box::new(ReplaceCli::new(Arc::clone(&ctx.filesystem)))
}

/// The stock attachment set, in attach order.
pub fn builtin_registry() -> AttachmentRegistry {
    let mut registry = AttachmentRegistry::new();
    for (id, factory) in [
        (SHARED_ID, shared as AttachmentFactory),
        (EXAMPLE_SERVICE_ID, example_service),
        (REPLACE_CLI_ID, replace_cli),
    ] {
        match ClassIdentifier::parse(id) {
            Ok(identifier) => {
                registry.register(identifier, factory);
            }
            Err(e) => debug!(id, error = %e, "Skipping built-in attachment"),
        }
    }
    registry
}
