//! `wpkickstart config`: read and write configuration values.

use std::path::{Path, PathBuf};

use crate::{
    cli::{ConfigCommands, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Keys `config get` and `config set` understand.
const KNOWN_KEYS: &[&str] = &[
    "plugin.file",
    "plugin.base_url",
    "plugin.debug",
    "output.no_color",
    "output.format",
    "logging.file",
];

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value:?}"))?;
        }

        ConfigCommands::Set { key, value } => {
            let path = target_path(&global);
            set_config_value(&path, &key, &value)?;
            output.success(&format!("Set {key} = {value:?} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
                return Ok(());
            }
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&target_path(&global).display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn target_path(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(AppConfig::active_path)
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!(
            "Unknown config key: '{key}' (known keys: {})",
            KNOWN_KEYS.join(", ")
        ),
        source: None,
    }
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let display_path = |path: &Option<PathBuf>| {
        path.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    };

    match key {
        "plugin.file" => Ok(display_path(&config.plugin.file)),
        "plugin.base_url" => Ok(config.plugin.base_url.clone()),
        "plugin.debug" => Ok(config.plugin.debug.to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "logging.file" => Ok(display_path(&config.logging.file)),
        _ => Err(unknown_key(key)),
    }
}

/// Parse `raw` into the TOML type `key` holds.
fn typed_value(key: &str, raw: &str) -> CliResult<toml::Value> {
    match key {
        "plugin.debug" | "output.no_color" => raw
            .trim()
            .parse::<bool>()
            .map(toml::Value::Boolean)
            .map_err(|e| CliError::InvalidInput {
                message: format!("'{key}' expects true or false, got '{raw}'"),
                source: Some(Box::new(e)),
            }),
        "output.format" => match OutputFormat::from_config(raw) {
            Some(_) => Ok(toml::Value::String(raw.trim().to_ascii_lowercase())),
            None => Err(CliError::InvalidInput {
                message: format!("'{key}' must be one of auto, human, plain, json; got '{raw}'"),
                source: None,
            }),
        },
        _ if KNOWN_KEYS.contains(&key) => Ok(toml::Value::String(raw.to_owned())),
        _ => Err(unknown_key(key)),
    }
}

/// Update one dotted key in the TOML file at `path`, creating it if needed.
///
/// Unrelated keys and tables in the file are preserved.
fn set_config_value(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    let value = typed_value(key, raw)?;
    let (section, field) = key.split_once('.').ok_or_else(|| unknown_key(key))?;

    let mut document: toml::Table = if path.exists() {
        let text = std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read config '{}'", path.display()))?;
        toml::from_str(&text)
            .with_cli_context(|| format!("Failed to parse config '{}'", path.display()))?
    } else {
        toml::Table::new()
    };

    let table = document
        .entry(section)
        .or_insert_with(|| toml::Value::Table(toml::Table::new()))
        .as_table_mut()
        .ok_or_else(|| CliError::ConfigError {
            message: format!("'{section}' in '{}' is not a table", path.display()),
            source: None,
        })?;
    table.insert(field.to_owned(), value);

    let text = toml::to_string_pretty(&document).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    // The whole document must still be a valid configuration.
    toml::from_str::<AppConfig>(&text)
        .with_cli_context(|| format!("Refusing to write an invalid config to '{}'", path.display()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}

// ── tests ─────────────────────────────────────────────────────────────────────
