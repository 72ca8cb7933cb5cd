//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "wpkickstart",
    bin_name = "wpkickstart",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Kickstart a WordPress plugin from the wpkickstart template",
    long_about = "wpkickstart boots a plugin built on the wpkickstart framework, \
                  resolves its classes by naming convention and strips the \
                  example scaffolding from a freshly generated project.",
    after_help = "EXAMPLES:\n\
        \x20 wpkickstart -p my-plugin/my-plugin.php kickstart --yes\n\
        \x20 wpkickstart -p my-plugin/my-plugin.php resolve 'Vendor\\Plugin\\Service\\Example_Service'\n\
        \x20 wpkickstart -p my-plugin/my-plugin.php info\n\
        \x20 wpkickstart completions bash > /usr/share/bash-completion/completions/wpkickstart",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Strip the example scaffolding from the plugin.
    #[command(
        visible_alias = "k",
        about = "Remove the example scaffolding from the plugin",
        after_help = "EXAMPLES:\n\
            \x20 wpkickstart -p my-plugin/my-plugin.php kickstart\n\
            \x20 wpkickstart -p my-plugin/my-plugin.php kickstart --since 0.1.0 --yes"
    )]
    Kickstart(KickstartArgs),

    /// Resolve a class identifier to its source file.
    #[command(
        visible_alias = "r",
        about = "Resolve a class identifier to a file",
        after_help = "EXAMPLES:\n\
            \x20 wpkickstart resolve 'Vendor\\Plugin\\Service\\Replace_CLI'\n\
            \x20 wpkickstart resolve Vendor::Plugin::App --explain"
    )]
    Resolve(ResolveArgs),

    /// Show plugin metadata, attachments and registered commands.
    #[command(about = "Show plugin information")]
    Info,

    /// Broadcast the deactivate phase to every attachment.
    #[command(about = "Run the deactivate phase")]
    Deactivate,

    /// Initialise a wpkickstart configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 wpkickstart init           # default location\n\
            \x20 wpkickstart init --local   # .wpkickstart.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 wpkickstart completions bash > ~/.local/share/bash-completion/completions/wpkickstart\n\
            \x20 wpkickstart completions zsh  > ~/.zfunc/_wpkickstart\n\
            \x20 wpkickstart completions fish > ~/.config/fish/completions/wpkickstart.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the wpkickstart configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 wpkickstart config get plugin.base_url\n\
            \x20 wpkickstart config set plugin.debug true\n\
            \x20 wpkickstart config list"
    )]
    Config(ConfigCommands),
}

// ── kickstart ─────────────────────────────────────────────────────────────────

/// Arguments for `wpkickstart kickstart`.
#[derive(Debug, Args)]
pub struct KickstartArgs {
    /// Version the project starts from.
    #[arg(
        long = "since",
        value_name = "VERSION",
        help = "Version the project starts from [default: 1.0.0]"
    )]
    pub since: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and rewrite immediately")]
    pub yes: bool,
}

// ── resolve ───────────────────────────────────────────────────────────────────

/// Arguments for `wpkickstart resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Class identifier, e.g. `Vendor\Plugin\Service\Example_Service`.
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: String,

    /// List every candidate path that was considered.
    #[arg(long = "explain", help = "Show every candidate path in lookup order")]
    pub explain: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `wpkickstart init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.wpkickstart.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `wpkickstart completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `wpkickstart config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `plugin.base_url`.
        key: String,
    },
    /// Set a configuration key in the active configuration file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
