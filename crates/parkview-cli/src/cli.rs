//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AttributeArgs, CompareArgs, ModelArgs, RunArgs};

/// Parkview - driver-based scenario modeling for attraction operators
#[derive(Parser)]
#[command(name = "parkview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Scenario model file (JSON, TOML or YAML). Defaults to the built-in model.
    #[arg(short, long, env = "PARKVIEW_MODEL", global = true)]
    pub model: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Project outcomes for a set of driver adjustments
    Run(RunArgs),

    /// Run several scenarios and rank them by a focus outcome
    Compare(CompareArgs),

    /// Break outcome changes down by driver
    Attribute(AttributeArgs),

    /// Inspect the active scenario model
    Model(ModelArgs),

    /// List the built-in scenario presets
    Presets,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal tab-separated output
    Minimal,
}
