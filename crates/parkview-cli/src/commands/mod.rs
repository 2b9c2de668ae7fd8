//! CLI command implementations.

pub mod attribute;
pub mod compare;
pub mod model;
pub mod presets;
pub mod run;

// Re-export argument types for convenience
pub use attribute::AttributeArgs;
pub use compare::CompareArgs;
pub use model::ModelArgs;
pub use run::RunArgs;

use parkview_config::ScenarioModel;
use parkview_core::{Diagnostic, DriverValues};
use parkview_scenario::{presets as builtin, Scenario};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::print_warning;

/// Settings shared by every command.
pub struct Context {
    /// The active scenario model.
    pub model: ScenarioModel,
    /// Output format.
    pub format: OutputFormat,
    /// Suppress headers and warnings.
    pub quiet: bool,
}

impl Context {
    /// Prints calculator diagnostics as warnings unless quiet.
    pub fn warn_diagnostics(&self, diagnostics: &[Diagnostic]) {
        if self.quiet {
            return;
        }
        for diagnostic in diagnostics {
            print_warning(&diagnostic.to_string());
        }
    }

    /// Fails if `outcome` is not a metric of the active model.
    pub fn require_outcome(&self, outcome: &str) -> CliResult<()> {
        if self.model.metric(outcome).is_some() {
            Ok(())
        } else {
            Err(CliError::UnknownOutcome(outcome.to_string()))
        }
    }
}

/// Parses `ID=PCT` driver arguments. Later arguments override earlier ones.
pub fn parse_drivers(args: &[String]) -> CliResult<DriverValues> {
    let mut values = DriverValues::new();
    for arg in args {
        let (id, pct) = DriverValues::parse_assignment(arg)?;
        values.insert(id, pct);
    }
    Ok(values)
}

/// Builds the scenario to run: the preset's drivers first, explicit
/// `--driver` arguments on top.
pub fn resolve_scenario(preset: Option<&str>, drivers: &[String]) -> CliResult<Scenario> {
    let overrides = parse_drivers(drivers)?;
    let base = match preset {
        Some(name) => builtin::find(name).ok_or_else(|| CliError::UnknownPreset {
            name: name.to_string(),
        })?,
        None => Scenario::new("Custom"),
    };

    let drivers = base.drivers.clone().merged(&overrides);
    let name = if preset.is_some() && !overrides.is_empty() {
        format!("{} (adjusted)", base.name)
    } else {
        base.name.clone()
    };

    let mut scenario = base.with_drivers(drivers);
    scenario.name = name;
    Ok(scenario)
}
