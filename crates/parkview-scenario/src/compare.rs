//! Running and comparing scenarios.

use serde::{Deserialize, Serialize};
use tracing::debug;

use parkview_config::ScenarioModel;
use parkview_core::{Diagnostic, OutcomeResult, OutcomeSnapshot};

use crate::calculator::compute_outcomes_with_diagnostics;
use crate::scenario::Scenario;

/// Batches at least this large are run on the rayon pool when the
/// `parallel` feature is enabled.
pub const PARALLEL_THRESHOLD: usize = 64;

/// Result of running one scenario against a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario name.
    pub name: String,

    /// Projected outcomes.
    pub snapshot: OutcomeSnapshot,

    /// Findings raised while computing the snapshot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ScenarioResult {
    /// Returns the projected result for `outcome`.
    #[must_use]
    pub fn outcome(&self, outcome: &str) -> Option<&OutcomeResult> {
        self.snapshot.get(outcome)
    }

    /// Percent change of `outcome` versus baseline.
    #[must_use]
    pub fn percent_change(&self, outcome: &str) -> Option<f64> {
        self.outcome(outcome).map(|r| r.percent_change)
    }
}

/// Runs a single scenario.
#[must_use]
pub fn run_scenario(model: &ScenarioModel, scenario: &Scenario) -> ScenarioResult {
    let (snapshot, diagnostics) = compute_outcomes_with_diagnostics(model, &scenario.drivers);
    ScenarioResult {
        name: scenario.name.clone(),
        snapshot,
        diagnostics,
    }
}

/// Runs every scenario, preserving input order.
///
/// # Example
///
/// ```rust
/// use parkview_config::ScenarioModel;
/// use parkview_scenario::{presets, run_scenarios, summarize_results};
///
/// let model = ScenarioModel::standard();
/// let results = run_scenarios(&model, &presets::all());
/// let summary = summarize_results(&results, "ebitda").unwrap();
///
/// assert_eq!(summary.scenario_count, results.len());
/// assert!(summary.worst_pct <= summary.best_pct);
/// ```
#[must_use]
pub fn run_scenarios(model: &ScenarioModel, scenarios: &[Scenario]) -> Vec<ScenarioResult> {
    debug!(count = scenarios.len(), "running scenarios");
    maybe_parallel_map(scenarios, |s| run_scenario(model, s))
}

#[allow(unused_variables)]
fn maybe_parallel_map<T, U, F>(items: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if items.len() >= PARALLEL_THRESHOLD {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

/// Results reporting `outcome`, paired with its percent change.
fn focus_pct<'a>(results: &'a [ScenarioResult], outcome: &str) -> Vec<(&'a ScenarioResult, f64)> {
    results
        .iter()
        .filter_map(|r| r.percent_change(outcome).map(|pct| (r, pct)))
        .collect()
}

/// The scenario with the lowest percent change in `outcome`.
#[must_use]
pub fn worst_case<'a>(results: &'a [ScenarioResult], outcome: &str) -> Option<&'a ScenarioResult> {
    focus_pct(results, outcome)
        .into_iter()
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(r, _)| r)
}

/// The scenario with the highest percent change in `outcome`.
#[must_use]
pub fn best_case<'a>(results: &'a [ScenarioResult], outcome: &str) -> Option<&'a ScenarioResult> {
    focus_pct(results, outcome)
        .into_iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(r, _)| r)
}

/// Summary of a scenario comparison for one focus outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Focus outcome.
    pub outcome: String,

    /// Number of scenarios that report the focus outcome.
    pub scenario_count: usize,

    /// Worst-case scenario name.
    pub worst_scenario: String,

    /// Worst-case percent change.
    pub worst_pct: f64,

    /// Best-case scenario name.
    pub best_scenario: String,

    /// Best-case percent change.
    pub best_pct: f64,

    /// Average percent change.
    pub avg_pct: f64,
}

/// Summarizes `results` by the percent change of `outcome`.
///
/// Returns `None` when no result reports the outcome.
#[must_use]
pub fn summarize_results(results: &[ScenarioResult], outcome: &str) -> Option<ScenarioSummary> {
    let worst = worst_case(results, outcome)?;
    let best = best_case(results, outcome)?;

    let (count, total) = focus_pct(results, outcome)
        .into_iter()
        .fold((0_usize, 0.0_f64), |(n, sum), (_, pct)| (n + 1, sum + pct));

    Some(ScenarioSummary {
        outcome: outcome.to_string(),
        scenario_count: count,
        worst_scenario: worst.name.clone(),
        worst_pct: worst.percent_change(outcome)?,
        best_scenario: best.name.clone(),
        best_pct: best.percent_change(outcome)?,
        avg_pct: total / count as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use approx::assert_relative_eq;

    #[test]
    fn test_run_scenario_keeps_name() {
        let model = ScenarioModel::standard();
        let result = run_scenario(&model, &presets::wage_inflation());

        assert_eq!(result.name, "Wage Inflation");
        assert!(result.diagnostics.is_empty());
        assert_relative_eq!(
            result.percent_change("ebitda").unwrap(),
            12.0 * -0.8,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_run_scenarios_preserves_order() {
        let model = ScenarioModel::standard();
        let scenarios = presets::all();
        let results = run_scenarios(&model, &scenarios);

        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        let expected: Vec<_> = scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_worst_and_best() {
        let model = ScenarioModel::standard();
        let scenarios = vec![
            Scenario::new("Down").with_driver("cost.labor", 10.0),
            Scenario::new("Flat"),
            Scenario::new("Up").with_driver("revenue.ticketPrice", 10.0),
        ];
        let results = run_scenarios(&model, &scenarios);

        assert_eq!(worst_case(&results, "ebitda").unwrap().name, "Down");
        assert_eq!(best_case(&results, "ebitda").unwrap().name, "Up");

        let summary = summarize_results(&results, "ebitda").unwrap();
        assert_eq!(summary.scenario_count, 3);
        assert_relative_eq!(summary.worst_pct, -8.0, epsilon = 1e-9);
        assert_relative_eq!(summary.best_pct, 11.0, epsilon = 1e-9);
        assert_relative_eq!(summary.avg_pct, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_focus_outcome() {
        let model = ScenarioModel::standard();
        let results = run_scenarios(&model, &presets::all());
        assert!(worst_case(&results, "waitTime").is_none());
        assert!(summarize_results(&results, "waitTime").is_none());
        assert!(summarize_results(&[], "ebitda").is_none());
    }
}
