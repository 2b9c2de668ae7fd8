//! Attribute command implementation.
//!
//! Shows how much each driver contributes to each outcome change.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use parkview_scenario::{attribute_impacts, top_drivers, ImpactContribution};

use crate::cli::OutputFormat;
use crate::commands::{resolve_scenario, Context};
use crate::output::{format_change, print_header, print_output};

/// Arguments for the attribute command.
#[derive(Args, Debug)]
pub struct AttributeArgs {
    /// Start from a built-in preset (name or slug)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Driver adjustment as ID=PCT (repeatable)
    #[arg(short, long = "driver", value_name = "ID=PCT")]
    pub drivers: Vec<String>,

    /// Only show contributions to this outcome, largest first
    #[arg(short, long)]
    pub outcome: Option<String>,

    /// Maximum number of rows when --outcome is given
    #[arg(long)]
    pub top: Option<usize>,
}

/// One driver/outcome contribution.
#[derive(Debug, Serialize, Tabled)]
struct ContributionRow {
    #[tabled(rename = "Driver")]
    driver: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Adjustment")]
    #[serde(skip)]
    percent_display: String,
    #[tabled(rename = "Factor")]
    factor: f64,
    #[tabled(rename = "Impact")]
    #[serde(skip)]
    impact_display: String,
    #[tabled(rename = "Share of Baseline")]
    #[serde(skip)]
    impact_pct_display: String,
    #[tabled(skip)]
    percent: f64,
    #[tabled(skip)]
    impact: f64,
    #[tabled(skip)]
    impact_pct: f64,
}

impl From<&ImpactContribution> for ContributionRow {
    fn from(c: &ImpactContribution) -> Self {
        Self {
            driver: c.driver.to_string(),
            outcome: c.outcome.to_string(),
            percent_display: format_change(c.percent),
            factor: c.factor,
            impact_display: format!("{:+.4}", c.impact),
            impact_pct_display: format_change(c.impact_pct),
            percent: c.percent,
            impact: c.impact,
            impact_pct: c.impact_pct,
        }
    }
}

/// Execute the attribute command.
pub fn execute(args: AttributeArgs, ctx: &Context) -> Result<()> {
    if let Some(outcome) = &args.outcome {
        ctx.require_outcome(outcome)?;
    }

    let scenario = resolve_scenario(args.preset.as_deref(), &args.drivers)?;
    let contributions = attribute_impacts(&ctx.model, &scenario.drivers);

    let rows: Vec<ContributionRow> = match &args.outcome {
        Some(outcome) => {
            let n = args.top.unwrap_or(usize::MAX);
            top_drivers(&contributions, outcome, n)
                .into_iter()
                .map(ContributionRow::from)
                .collect()
        }
        None => contributions.iter().map(ContributionRow::from).collect(),
    };

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header(&format!("Impact attribution: {}", scenario.name));
            }
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}\t{}\t{:+.4}", row.driver, row.outcome, row.impact);
            }
        }
    }

    Ok(())
}
