//! Per-driver impact attribution.
//!
//! Breaks a snapshot down into the contribution of each driver to each
//! outcome. Rows are produced by the same walk as the calculator, so for every
//! outcome, adding the row impacts to the baseline in row order reproduces the
//! snapshot value exactly.

use serde::{Deserialize, Serialize};

use parkview_config::ScenarioModel;
use parkview_core::{DriverId, DriverValues, OutcomeId};

use crate::calculator::{baseline_snapshot, linear_impact};

/// Contribution of one driver to one outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactContribution {
    /// Driver.
    pub driver: DriverId,

    /// Outcome.
    pub outcome: OutcomeId,

    /// Driver adjustment in percent.
    pub percent: f64,

    /// Impact factor applied.
    pub factor: f64,

    /// Absolute change to the outcome value.
    pub impact: f64,

    /// Change as a percentage of the outcome baseline.
    pub impact_pct: f64,
}

/// Attributes the projected change of every outcome to the drivers causing it.
///
/// Rows with a zero impact are omitted. Rows are sorted by driver, then
/// outcome.
#[must_use]
pub fn attribute_impacts(model: &ScenarioModel, drivers: &DriverValues) -> Vec<ImpactContribution> {
    let baseline = baseline_snapshot(model, &mut Vec::new());
    let mut rows = Vec::new();

    for (driver, percent) in drivers.iter() {
        if !percent.is_finite() {
            continue;
        }
        let Some(outcomes) = model.relationships.outcomes_for(driver.as_str()) else {
            continue;
        };

        let mut applied: Vec<&OutcomeId> = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            if applied.contains(&outcome) {
                continue;
            }
            applied.push(outcome);

            let Some(base) = baseline.get(outcome.as_str()).map(|r| r.baseline) else {
                continue;
            };

            let factor = model.impact_factors.factor(driver.as_str(), outcome.as_str());
            if !factor.is_finite() {
                continue;
            }
            let impact = linear_impact(percent, factor, base);
            if impact == 0.0 {
                continue;
            }

            rows.push(ImpactContribution {
                driver: driver.clone(),
                outcome: outcome.clone(),
                percent,
                factor,
                impact,
                impact_pct: if base == 0.0 { 0.0 } else { impact / base * 100.0 },
            });
        }
    }

    // Stable: equal keys keep calculator order
    rows.sort_by(|a, b| (&a.driver, &a.outcome).cmp(&(&b.driver, &b.outcome)));
    rows
}

/// The `n` largest contributions to `outcome` by absolute impact.
#[must_use]
pub fn top_drivers<'a>(
    contributions: &'a [ImpactContribution],
    outcome: &str,
    n: usize,
) -> Vec<&'a ImpactContribution> {
    let mut matching: Vec<_> = contributions
        .iter()
        .filter(|c| c.outcome.as_str() == outcome)
        .collect();
    matching.sort_by(|a, b| {
        b.impact
            .abs()
            .partial_cmp(&a.impact.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matching.truncate(n);
    matching
}
