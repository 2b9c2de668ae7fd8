//! Run command implementation.
//!
//! Projects every outcome metric for one set of driver adjustments.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use parkview_scenario::run_scenario;

use crate::cli::OutputFormat;
use crate::commands::{resolve_scenario, Context};
use crate::output::{format_change, format_value, print_header, print_json, print_output};

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Start from a built-in preset (name or slug)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Driver adjustment as ID=PCT (repeatable), e.g. cost.labor=10
    #[arg(short, long = "driver", value_name = "ID=PCT")]
    pub drivers: Vec<String>,

    /// Only show outcomes that changed
    #[arg(long)]
    pub changed: bool,
}

/// One projected outcome.
#[derive(Debug, Serialize, Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Outcome")]
    key: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(skip)]
    unit: String,
    #[tabled(skip)]
    baseline: f64,
    #[tabled(skip)]
    value: f64,
    #[tabled(skip)]
    percent_change: f64,
    #[tabled(rename = "Baseline")]
    #[serde(skip)]
    baseline_display: String,
    #[tabled(rename = "Projected")]
    #[serde(skip)]
    value_display: String,
    #[tabled(rename = "Change")]
    #[serde(skip)]
    change_display: String,
}

/// Execute the run command.
pub fn execute(args: RunArgs, ctx: &Context) -> Result<()> {
    let scenario = resolve_scenario(args.preset.as_deref(), &args.drivers)?;
    let result = run_scenario(&ctx.model, &scenario);
    ctx.warn_diagnostics(&result.diagnostics);

    let rows: Vec<OutcomeRow> = result
        .snapshot
        .iter()
        .filter(|(_, r)| !args.changed || r.value != r.baseline)
        .map(|(key, r)| OutcomeRow {
            key: key.to_string(),
            label: r.label.clone(),
            unit: r.unit.clone(),
            baseline: r.baseline,
            value: r.value,
            percent_change: r.percent_change,
            baseline_display: format_value(r.baseline, &r.unit),
            value_display: format_value(r.value, &r.unit),
            change_display: format_change(r.percent_change),
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header(&format!("Scenario: {}", result.name));
            }
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}\t{:.4}\t{:+.4}", row.key, row.value, row.percent_change);
            }
        }
    }

    Ok(())
}
