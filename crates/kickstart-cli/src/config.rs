//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `WP_DEBUG` (forces `plugin.debug` on)
//! 3. Environment variables `KICKSTART__<SECTION>__<KEY>`
//! 4. Config file: `--config`, else `./.wpkickstart.toml`, else the user
//!    config directory
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use tracing::debug;

use kickstart_core::application::services::DEFAULT_BASE_URL;

/// File name of a project-local configuration.
pub const LOCAL_CONFIG_FILE: &str = ".wpkickstart.toml";

/// Prefix of configuration environment variables.
const ENV_PREFIX: &str = "KICKSTART";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Plugin location and runtime options.
    pub plugin: PluginConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Main plugin file. `--plugin-file` wins over this.
    pub file: Option<PathBuf>,
    /// URL of the directory that holds the plugin directory.
    pub base_url: String,
    pub debug: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            file: None,
            base_url: DEFAULT_BASE_URL.into(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs (without colour) to this file.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from file and environment on top of the defaults.
    ///
    /// An explicit `config_file` must exist; discovered files are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut config = Self::load_from(config_file.map(PathBuf::as_path), None)?;

        if std::env::var("WP_DEBUG").is_ok_and(|v| is_truthy(&v)) {
            debug!("WP_DEBUG is set, enabling debug mode");
            config.plugin.debug = true;
        }

        Ok(config)
    }

    /// Load with an explicit environment map instead of the process
    /// environment (`None` reads the process environment).
    pub fn load_from(
        config_file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                let path = Self::active_path();
                debug!(path = %path.display(), "Looking for configuration file");
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
            }
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(env);

        builder
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the user-level configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.wpkickstart.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "wpkickstart", "wpkickstart")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file [`AppConfig::load`] reads when no `--config` is given.
    pub fn active_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            local
        } else {
            Self::config_path()
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
