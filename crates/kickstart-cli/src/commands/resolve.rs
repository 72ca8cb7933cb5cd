//! `wpkickstart resolve`: map a class identifier to its source file.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use kickstart_adapters::LocalFilesystem;
use kickstart_core::prelude::*;

use crate::{
    cli::{GlobalArgs, ResolveArgs},
    commands::{open, plugin_file},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Resolution {
    identifier: String,
    root: PathBuf,
    path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    candidates: Vec<PathBuf>,
}

/// Resolve against the plugin directory, or the current directory when no
/// plugin file is configured.
pub fn execute(
    args: ResolveArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let identifier = ClassIdentifier::parse(&args.identifier).map_err(KickstartError::from)?;

    let app;
    let standalone;
    let resolver: &Resolver = match plugin_file(&global, &config) {
        Ok(_) => {
            app = open(&global, &config)?;
            app.resolver()
        }
        Err(_) => {
            let cwd = std::env::current_dir()
                .with_cli_context(|| "Failed to read the current directory")?;
            standalone = Resolver::new(cwd, Arc::new(LocalFilesystem::new()));
            &standalone
        }
    };

    let resolution = Resolution {
        identifier: identifier.to_string(),
        root: resolver.root().to_path_buf(),
        path: resolver.resolve(&identifier),
        candidates: if args.explain {
            resolver.candidates(&identifier)
        } else {
            Vec::new()
        },
    };

    if output.is_json() {
        output.json(&resolution)?;
    } else {
        if args.explain {
            output.header(&format!("Candidates for {}", resolution.identifier))?;
            for candidate in &resolution.candidates {
                output.print(&format!("  {}", candidate.display()))?;
            }
        }
        if let Some(path) = &resolution.path {
            // Printed even with --quiet so scripts can capture it.
            println!("{}", path.display());
        }
    }

    match resolution.path {
        Some(_) => Ok(()),
        None => Err(CliError::NotResolved {
            identifier: resolution.identifier,
        }),
    }
}
