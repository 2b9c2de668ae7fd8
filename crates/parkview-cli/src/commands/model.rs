//! Model command implementation.
//!
//! Inspects and validates the active scenario model.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use parkview_config::{ScenarioModel, Validate};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{
    format_value, print_header, print_json, print_output, print_success, print_warning, KeyValue,
};

/// Arguments for the model command.
#[derive(Args, Debug)]
pub struct ModelArgs {
    #[command(subcommand)]
    pub command: ModelCommand,
}

/// Model subcommands.
#[derive(Subcommand, Debug)]
pub enum ModelCommand {
    /// Show a summary of the model (the full model with --format json)
    Show,

    /// List the driver catalog
    Drivers,

    /// List the outcome metrics
    Outcomes,

    /// Validate the model; exits non-zero when errors are found
    Validate,
}

#[derive(Debug, Serialize, Tabled)]
struct DriverRow {
    #[tabled(rename = "Driver")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Min")]
    min: f64,
    #[tabled(rename = "Max")]
    max: f64,
    #[tabled(rename = "Default")]
    default: f64,
    #[tabled(rename = "Outcomes")]
    outcomes: String,
}

#[derive(Debug, Serialize, Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Outcome")]
    key: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Baseline")]
    baseline: String,
    #[tabled(rename = "Drivers")]
    drivers: usize,
}

#[derive(Debug, Serialize, Tabled)]
struct IssueRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Problem")]
    message: String,
    #[tabled(rename = "Rule")]
    rule: String,
}

/// Execute the model command.
pub fn execute(args: ModelArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ModelCommand::Show => show(ctx),
        ModelCommand::Drivers => drivers(ctx),
        ModelCommand::Outcomes => outcomes(ctx),
        ModelCommand::Validate => validate(ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let model = &ctx.model;
    if ctx.format == OutputFormat::Json {
        return print_json(model);
    }

    let rows = vec![
        KeyValue::new("Name", model.name.clone()),
        KeyValue::new("Description", model.description.clone().unwrap_or_default()),
        KeyValue::new("Outcome metrics", model.metrics.len().to_string()),
        KeyValue::new("Cataloged drivers", model.drivers.len().to_string()),
        KeyValue::new("Relationships", model.relationships.len().to_string()),
        KeyValue::new("Impact factors", model.impact_factors.len().to_string()),
    ];

    if ctx.format == OutputFormat::Table && !ctx.quiet {
        print_header("Scenario Model");
    }
    print_output(&rows, ctx.format)
}

fn drivers(ctx: &Context) -> Result<()> {
    let model = &ctx.model;
    let rows: Vec<DriverRow> = model
        .drivers_by_category()
        .into_values()
        .flatten()
        .map(|d| DriverRow {
            id: d.id.to_string(),
            label: d.label.clone(),
            category: d.category.to_string(),
            min: d.min,
            max: d.max,
            default: d.default,
            outcomes: related_outcomes(model, d.id.as_str()),
        })
        .collect();

    match ctx.format {
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.id);
            }
            Ok(())
        }
        _ => print_output(&rows, ctx.format),
    }
}

fn related_outcomes(model: &ScenarioModel, driver: &str) -> String {
    model
        .relationships
        .outcomes_for(driver)
        .map(|outs| {
            outs.iter()
                .map(|o| o.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

fn outcomes(ctx: &Context) -> Result<()> {
    let model = &ctx.model;
    let rows: Vec<OutcomeRow> = model
        .metrics
        .iter()
        .map(|m| OutcomeRow {
            key: m.key.to_string(),
            label: m.label.clone(),
            unit: m.unit.clone(),
            baseline: m
                .baseline
                .map(|b| format_value(b, &m.unit))
                .unwrap_or_else(|| "-".to_string()),
            drivers: model.relationships.drivers_affecting(m.key.as_str()).count(),
        })
        .collect();

    match ctx.format {
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.key);
            }
            Ok(())
        }
        _ => print_output(&rows, ctx.format),
    }
}

fn validate(ctx: &Context) -> Result<()> {
    let errors = ctx.model.validate();

    let rows: Vec<IssueRow> = errors
        .iter()
        .map(|e| IssueRow {
            field: e.field.clone(),
            message: e.message.clone(),
            rule: e.rule.clone().unwrap_or_default(),
        })
        .collect();

    match ctx.format {
        OutputFormat::Table | OutputFormat::Minimal => {
            if errors.is_empty() {
                if !ctx.quiet {
                    print_success(&format!("Model '{}' is valid", ctx.model.name));
                }
            } else {
                for error in &errors {
                    print_warning(&error.to_string());
                }
            }
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, ctx.format)?,
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CliError::ValidationFailed(errors.len()).into())
    }
}
