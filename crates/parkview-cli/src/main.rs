//! Parkview CLI - driver-based scenario modeling for attraction operators.
//!
//! # Usage
//!
//! ```bash
//! # Project outcomes for a labor cost increase
//! parkview run --driver cost.labor=10
//!
//! # Start from a preset and override one driver
//! parkview run --preset recession --driver marketing.spend=0
//!
//! # Rank the built-in presets by EBITDA
//! parkview compare --focus ebitda
//!
//! # Which drivers move EBITDA the most?
//! parkview attribute --preset heat-wave --outcome ebitda
//!
//! # Check a custom model file
//! parkview --model park.yaml model validate
//! ```

use std::path::Path;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parkview_config::ScenarioModel;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let ctx = Context {
        model: load_model(cli.model.as_deref())?,
        format: cli.format,
        quiet: cli.quiet,
    };

    // Execute command
    match cli.command {
        Commands::Run(args) => commands::run::execute(args, &ctx)?,
        Commands::Compare(args) => commands::compare::execute(args, &ctx)?,
        Commands::Attribute(args) => commands::attribute::execute(args, &ctx)?,
        Commands::Model(args) => commands::model::execute(args, &ctx)?,
        Commands::Presets => commands::presets::execute(&ctx)?,
    }

    Ok(())
}

/// Logs go to stderr. `RUST_LOG` is honored unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn load_model(path: Option<&Path>) -> Result<ScenarioModel> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading scenario model");
            ScenarioModel::from_path(path)
                .with_context(|| format!("Failed to load model from '{}'", path.display()))
        }
        None => Ok(ScenarioModel::standard()),
    }
}
