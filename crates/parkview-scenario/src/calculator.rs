//! Outcome calculator.
//!
//! Applies percentage driver adjustments to baseline outcome metrics using the
//! model's linear impact factors.
//!
//! ## Formula
//!
//! For every outcome `o` with baseline `B`:
//!
//! ```text
//! value(o) = B + Σ (pct_d / 100) × factor(d, o) × B
//! ```
//!
//! summed over the drivers `d` whose relationship lists `o`. Every term is
//! computed against `B`, never against the running value, so terms are
//! independent of each other. Drivers are visited in id order, which fixes the
//! floating point summation order: the same adjustments always give
//! bit-identical results, however the caller assembled them.

use tracing::{debug, warn};

use parkview_config::ScenarioModel;
use parkview_core::{
    percent_change, Diagnostic, DriverValues, OutcomeId, OutcomeResult, OutcomeSnapshot,
};

/// The additive contribution of one driver to one outcome.
#[inline]
#[must_use]
pub fn linear_impact(percent: f64, factor: f64, baseline: f64) -> f64 {
    (percent / 100.0) * factor * baseline
}

/// Computes the projected snapshot for a set of driver adjustments.
///
/// Never fails: unknown drivers and outcomes, missing or non-finite factors,
/// repeated relationship entries and malformed metrics are skipped and logged. See
/// [`compute_outcomes_with_diagnostics`] to collect those findings.
///
/// # Example
///
/// ```rust
/// use parkview_config::ScenarioModel;
/// use parkview_core::DriverValues;
/// use parkview_scenario::compute_outcomes;
///
/// let model = ScenarioModel::standard();
/// let snapshot = compute_outcomes(&model, &DriverValues::new().with("cost.labor", 10.0));
///
/// let ebitda = snapshot.get("ebitda").unwrap();
/// assert_eq!(ebitda.value, 98.3 + (10.0 / 100.0) * -0.8 * 98.3);
/// assert!((ebitda.percent_change - -8.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn compute_outcomes(model: &ScenarioModel, drivers: &DriverValues) -> OutcomeSnapshot {
    compute_outcomes_with_diagnostics(model, drivers).0
}

/// Computes the snapshot and returns the diagnostics raised along the way.
#[must_use]
pub fn compute_outcomes_with_diagnostics(
    model: &ScenarioModel,
    drivers: &DriverValues,
) -> (OutcomeSnapshot, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut snapshot = baseline_snapshot(model, &mut diagnostics);

    for (driver, percent) in drivers.iter() {
        if !percent.is_finite() {
            warn!(driver = %driver, value = percent, "ignoring non-finite driver value");
            diagnostics.push(Diagnostic::NonFiniteDriverValue {
                driver: driver.clone(),
                value: percent,
            });
            continue;
        }

        let Some(outcomes) = model.relationships.outcomes_for(driver.as_str()) else {
            debug!(driver = %driver, "driver has no configured outcomes");
            diagnostics.push(Diagnostic::UnknownDriver {
                driver: driver.clone(),
            });
            continue;
        };

        let mut applied: Vec<&OutcomeId> = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            if applied.contains(&outcome) {
                warn!(driver = %driver, outcome = %outcome, "outcome listed twice for driver; applying once");
                diagnostics.push(Diagnostic::DuplicateRelationship {
                    driver: driver.clone(),
                    outcome: outcome.clone(),
                });
                continue;
            }
            applied.push(outcome);

            let Some(result) = snapshot.get_mut(outcome.as_str()) else {
                warn!(driver = %driver, outcome = %outcome, "relationship references unknown outcome");
                diagnostics.push(Diagnostic::UnknownOutcome {
                    driver: driver.clone(),
                    outcome: outcome.clone(),
                });
                continue;
            };

            let factor = model.impact_factors.factor(driver.as_str(), outcome.as_str());
            if !factor.is_finite() {
                warn!(driver = %driver, outcome = %outcome, factor, "ignoring non-finite impact factor");
                diagnostics.push(Diagnostic::NonFiniteFactor {
                    driver: driver.clone(),
                    outcome: outcome.clone(),
                    value: factor,
                });
                continue;
            }
            result.value += linear_impact(percent, factor, result.baseline);
        }
    }

    for (_, result) in snapshot.iter_mut() {
        result.percent_change = percent_change(result.baseline, result.value);
    }

    debug!(
        drivers = drivers.len(),
        outcomes = snapshot.len(),
        diagnostics = diagnostics.len(),
        "computed outcome snapshot"
    );

    (snapshot, diagnostics)
}

/// Every usable metric at its baseline. Malformed and duplicate rows are
/// excluded and reported.
pub(crate) fn baseline_snapshot(
    model: &ScenarioModel,
    diagnostics: &mut Vec<Diagnostic>,
) -> OutcomeSnapshot {
    let mut snapshot = OutcomeSnapshot::new();

    for definition in &model.metrics {
        let Some(metric) = definition.to_metric() else {
            let reason = definition.defect().unwrap_or("unusable baseline");
            warn!(metric = %definition.key, reason, "excluding malformed outcome metric");
            diagnostics.push(Diagnostic::MalformedMetric {
                key: definition.key.clone(),
                reason: reason.to_string(),
            });
            continue;
        };

        if snapshot.contains(metric.key.as_str()) {
            warn!(metric = %metric.key, "duplicate outcome metric; keeping the first");
            diagnostics.push(Diagnostic::DuplicateMetric {
                key: metric.key.clone(),
            });
            continue;
        }

        let result = OutcomeResult::at_baseline(&metric);
        snapshot.insert(metric.key, result);
    }

    snapshot
}
