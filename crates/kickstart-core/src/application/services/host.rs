//! Host surface that attachments register against.
//!
//! During `hooks` and `run` an attachment may register named commands and
//! subscribe to action hooks. The CLI later looks commands up by name and
//! invokes them.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, services::plugin_app::AppInfo},
    domain::RewriteReport,
    error::KickstartResult,
};

/// One named argument accepted by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArgSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub default: Option<&'static str>,
    pub optional: bool,
}

/// Arguments passed to [`Command::invoke`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    pub positional: Vec<String>,
    pub named: BTreeMap<String, String>,
}

impl CommandArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style named argument.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.named.get(name).map(String::as_str)
    }
}

/// What a command did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub summary: String,
    /// Effective named arguments, defaults included.
    pub args: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RewriteReport>,
}

/// A command registered with the host.
pub trait Command: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Named arguments this command understands.
    fn synopsis(&self) -> &[ArgSpec] {
        &[]
    }

    fn invoke(&self, app: &AppInfo, args: &CommandArgs) -> KickstartResult<CommandOutcome>;
}

/// A host hook an attachment subscribed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub hook: String,
    pub owner: String,
    pub priority: i32,
}

/// Commands and actions registered during the lifecycle.
#[derive(Default)]
pub struct Host {
    commands: BTreeMap<String, Box<dyn Command>>,
    actions: Vec<Action>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. A second registration under the same name
    /// replaces the first.
    pub fn add_command(&mut self, command: Box<dyn Command>) {
        let name = command.name().to_owned();
        debug!(command = %name, "Registering command");
        if self.commands.insert(name.clone(), command).is_some() {
            warn!(command = %name, "Command registered twice, keeping the latest");
        }
    }

    pub fn command(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn command_names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.values().map(|c| c.as_ref())
    }

    pub fn add_action(&mut self, hook: impl Into<String>, owner: impl Into<String>, priority: i32) {
        let action = Action {
            hook: hook.into(),
            owner: owner.into(),
            priority,
        };
        debug!(hook = %action.hook, owner = %action.owner, "Registering action");
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Invoke a registered command.
    ///
    /// Unknown named arguments are rejected; declared arguments that were not
    /// supplied take their default.
    #[instrument(skip(self, app, args), fields(command = name))]
    pub fn invoke(
        &self,
        name: &str,
        app: &AppInfo,
        mut args: CommandArgs,
    ) -> KickstartResult<CommandOutcome> {
        let command = self
            .command(name)
            .ok_or_else(|| ApplicationError::CommandNotFound {
                name: name.to_owned(),
                available: self.command_names(),
            })?;

        let synopsis = command.synopsis();

        if let Some(unknown) = args
            .named
            .keys()
            .find(|key| !synopsis.iter().any(|spec| spec.name == key.as_str()))
        {
            return Err(ApplicationError::InvalidArgument {
                command: name.to_owned(),
                reason: format!("unknown argument '--{unknown}'"),
            }
            .into());
        }

        for spec in synopsis {
            if args.named.contains_key(spec.name) {
                continue;
            }
            match spec.default {
                Some(default) => {
                    args.named.insert(spec.name.to_owned(), default.to_owned());
                }
                None if !spec.optional => {
                    return Err(ApplicationError::InvalidArgument {
                        command: name.to_owned(),
                        reason: format!("missing required argument '--{}'", spec.name),
                    }
                    .into());
                }
                None => {}
            }
        }

        command.invoke(app, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KickstartError;
    use std::path::PathBuf;

    struct Echo;

    const ECHO_ARGS: &[ArgSpec] = &[
        ArgSpec {
            name: "since",
            description: "Version",
            default: Some("1.0.0"),
            optional: true,
        },
        ArgSpec {
            name: "note",
            description: "Free text",
            default: None,
            optional: true,
        },
    ];

    impl Command for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo arguments"
        }

        fn synopsis(&self) -> &[ArgSpec] {
            ECHO_ARGS
        }

        fn invoke(&self, _app: &AppInfo, args: &CommandArgs) -> KickstartResult<CommandOutcome> {
            Ok(CommandOutcome {
                summary: "echoed".into(),
                args: args.named.clone(),
                report: None,
            })
        }
    }

    fn info() -> AppInfo {
        AppInfo {
            plugin_file: PathBuf::from("/srv/plugin/plugin.php"),
            basename: "plugin/plugin.php".into(),
            path: PathBuf::from("/srv/plugin"),
            url: "http://localhost/plugin/".into(),
            debug: false,
            headers: Default::default(),
        }
    }

    #[test]
    fn fills_defaults() {
        let mut host = Host::new();
        host.add_command(Box::new(Echo));

        let outcome = host.invoke("echo", &info(), CommandArgs::new()).unwrap();
        assert_eq!(outcome.args.get("since").map(String::as_str), Some("1.0.0"));
        assert!(!outcome.args.contains_key("note"));
    }

    #[test]
    fn explicit_value_wins_over_default() {
        let mut host = Host::new();
        host.add_command(Box::new(Echo));

        let args = CommandArgs::new().with("since", "2.1.0");
        let outcome = host.invoke("echo", &info(), args).unwrap();
        assert_eq!(outcome.args["since"], "2.1.0");
    }

    #[test]
    fn rejects_unknown_argument() {
        let mut host = Host::new();
        host.add_command(Box::new(Echo));

        let err = host
            .invoke("echo", &info(), CommandArgs::new().with("bogus", "1"))
            .unwrap_err();
        assert!(matches!(
            err,
            KickstartError::Application(ApplicationError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn unknown_command_lists_available() {
        let mut host = Host::new();
        host.add_command(Box::new(Echo));

        match host.invoke("nope", &info(), CommandArgs::new()) {
            Err(KickstartError::Application(ApplicationError::CommandNotFound {
                available, ..
            })) => assert_eq!(available, vec!["echo".to_string()]),
            other => panic!("expected CommandNotFound, got {other:?}"),
        }
    }

    #[test]
    fn records_actions_in_order() {
        let mut host = Host::new();
        host.add_action("init", "a", 10);
        host.add_action("admin_init", "b", 5);
        let hooks: Vec<_> = host.actions().iter().map(|a| a.hook.as_str()).collect();
        assert_eq!(hooks, ["init", "admin_init"]);
    }
}
