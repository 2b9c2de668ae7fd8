//! Compare command implementation.
//!
//! Runs a batch of scenarios and ranks them by one focus outcome.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use parkview_scenario::{
    load_scenarios_from_path, presets, run_scenarios, summarize_results, ScenarioResult,
    ScenarioSummary,
};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{
    format_change, format_value, print_header, print_json, print_output, KeyValue,
};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Scenario file (JSON or YAML). Defaults to the built-in presets.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Outcome used to rank scenarios
    #[arg(long, default_value = "ebitda")]
    pub focus: String,
}

/// One scenario in the comparison.
#[derive(Debug, Serialize, Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(skip)]
    value: f64,
    #[tabled(skip)]
    percent_change: f64,
    #[tabled(rename = "Projected")]
    #[serde(skip)]
    value_display: String,
    #[tabled(rename = "Change")]
    #[serde(skip)]
    change_display: String,
    #[tabled(rename = "Outcomes Moved")]
    outcomes_changed: usize,
    #[tabled(rename = "Warnings")]
    warnings: usize,
}

#[derive(Serialize)]
struct ComparisonOutput<'a> {
    focus: &'a str,
    results: &'a [ScenarioResult],
    summary: Option<ScenarioSummary>,
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, ctx: &Context) -> Result<()> {
    ctx.require_outcome(&args.focus)?;

    let scenarios = match &args.file {
        Some(path) => load_scenarios_from_path(path)?.scenarios,
        None => presets::all(),
    };

    let results = run_scenarios(&ctx.model, &scenarios);
    for result in &results {
        ctx.warn_diagnostics(&result.diagnostics);
    }
    let summary = summarize_results(&results, &args.focus);

    let rows: Vec<ComparisonRow> = results
        .iter()
        .filter_map(|result| {
            let outcome = result.outcome(&args.focus)?;
            Some(ComparisonRow {
                scenario: result.name.clone(),
                value: outcome.value,
                percent_change: outcome.percent_change,
                value_display: format_value(outcome.value, &outcome.unit),
                change_display: format_change(outcome.percent_change),
                outcomes_changed: result.snapshot.changed().count(),
                warnings: result.diagnostics.len(),
            })
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header(&format!("Scenario comparison by {}", args.focus));
            }
            print_output(&rows, ctx.format)?;

            if let Some(summary) = &summary {
                if !ctx.quiet {
                    print_header("Summary");
                }
                print_output(&summary_rows(summary), ctx.format)?;
            }
        }
        OutputFormat::Json => print_json(&ComparisonOutput {
            focus: &args.focus,
            results: &results,
            summary,
        })?,
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Minimal => {
            if let Some(summary) = summary {
                println!(
                    "worst\t{}\t{:+.4}\nbest\t{}\t{:+.4}",
                    summary.worst_scenario,
                    summary.worst_pct,
                    summary.best_scenario,
                    summary.best_pct
                );
            }
        }
    }

    Ok(())
}

fn summary_rows(summary: &ScenarioSummary) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Scenarios", summary.scenario_count.to_string()),
        KeyValue::new(
            "Worst case",
            format!("{} ({})", summary.worst_scenario, format_change(summary.worst_pct)),
        ),
        KeyValue::new(
            "Best case",
            format!("{} ({})", summary.best_scenario, format_change(summary.best_pct)),
        ),
        KeyValue::new("Average change", format_change(summary.avg_pct)),
    ]
}
