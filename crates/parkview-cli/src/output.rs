//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
///
/// `Minimal` is handled by each command, so it falls back to CSV here.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv | OutputFormat::Minimal => print_csv(data),
    }
}

/// Prints a single value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a percent change with an explicit sign.
pub fn format_change(pct: f64) -> String {
    format!("{:+.2}%", pct)
}

/// Formats a value with its unit.
pub fn format_value(value: f64, unit: &str) -> String {
    match unit {
        "" => format!("{:.2}", value),
        "$" => format!("${:.2}", value),
        "$M" => format!("${:.2}M", value),
        "%" => format!("{:.2}%", value),
        _ => format!("{:.2} {}", value, unit),
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Property")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(-8.0), "-8.00%");
        assert_eq!(format_change(2.5), "+2.50%");
        assert_eq!(format_change(0.0), "+0.00%");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(98.3, "$M"), "$98.30M");
        assert_eq!(format_value(78.4, "$"), "$78.40");
        assert_eq!(format_value(23.8, "%"), "23.80%");
        assert_eq!(format_value(8450.0, "K"), "8450.00 K");
        assert_eq!(format_value(1.5, ""), "1.50");
    }
}
