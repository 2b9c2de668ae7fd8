//! Presets command implementation.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use parkview_scenario::presets;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_output};

#[derive(Debug, Serialize, Tabled)]
struct PresetRow {
    #[tabled(rename = "Preset")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Drivers")]
    drivers: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Execute the presets command.
pub fn execute(ctx: &Context) -> Result<()> {
    let rows: Vec<PresetRow> = presets::all()
        .into_iter()
        .map(|p| PresetRow {
            slug: p.slug(),
            drivers: p
                .drivers
                .iter()
                .map(|(id, pct)| format!("{id}={pct:+}"))
                .collect::<Vec<_>>()
                .join(" "),
            description: p.description.unwrap_or_default(),
            name: p.name,
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Built-in Presets");
            }
            print_output(&rows, ctx.format)
        }
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.slug);
            }
            Ok(())
        }
        _ => print_output(&rows, ctx.format),
    }
}
