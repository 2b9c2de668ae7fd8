//! Outcome metric definitions and calculation results.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::ids::OutcomeId;

/// Percent change of `value` relative to `baseline`: `(value / baseline - 1) * 100`.
///
/// A zero baseline yields `0.0`. Every driver impact is proportional to the
/// baseline, so an outcome with a zero baseline can never move.
#[must_use]
pub fn percent_change(baseline: f64, value: f64) -> f64 {
    if baseline == 0.0 {
        0.0
    } else {
        (value / baseline - 1.0) * 100.0
    }
}

/// A configured outcome metric row as it appears in a model file.
///
/// `baseline` is optional so that a row with a missing or non-numeric baseline
/// still loads; the calculator excludes such rows and reports a diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    /// Metric identifier (e.g. `revenue`).
    pub key: OutcomeId,

    /// Display name.
    #[serde(default)]
    pub label: String,

    /// Display unit (e.g. `$M`, `%`, `K`).
    #[serde(default)]
    pub unit: String,

    /// Reference value before any driver adjustment.
    #[serde(default, deserialize_with = "lenient_baseline")]
    pub baseline: Option<f64>,
}

impl MetricDefinition {
    /// Creates a metric definition with a baseline.
    #[must_use]
    pub fn new(
        key: impl Into<OutcomeId>,
        label: impl Into<String>,
        unit: impl Into<String>,
        baseline: f64,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            unit: unit.into(),
            baseline: Some(baseline),
        }
    }

    /// Creates a definition without a baseline.
    #[must_use]
    pub fn without_baseline(
        key: impl Into<OutcomeId>,
        label: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            unit: unit.into(),
            baseline: None,
        }
    }

    /// Returns the validated metric, or `None` when the baseline is missing or not finite.
    #[must_use]
    pub fn to_metric(&self) -> Option<OutcomeMetric> {
        match self.baseline {
            Some(b) if b.is_finite() => Some(OutcomeMetric {
                key: self.key.clone(),
                label: self.label.clone(),
                unit: self.unit.clone(),
                baseline: b,
            }),
            _ => None,
        }
    }

    /// Describes why this row is unusable, if it is.
    #[must_use]
    pub fn defect(&self) -> Option<&'static str> {
        match self.baseline {
            None => Some("missing numeric baseline"),
            Some(b) if !b.is_finite() => Some("baseline is not finite"),
            Some(_) => None,
        }
    }
}

/// Accepts any value for `baseline`, keeping it only when it is a number.
fn lenient_baseline<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(v)) => Some(v),
        Some(Raw::Other(_)) | None => None,
    })
}

/// An outcome metric with a finite baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeMetric {
    /// Metric identifier.
    pub key: OutcomeId,
    /// Display name.
    pub label: String,
    /// Display unit.
    pub unit: String,
    /// Reference value before any driver adjustment.
    pub baseline: f64,
}

/// The projected state of one outcome after applying driver adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeResult {
    /// Display name.
    pub label: String,

    /// Display unit.
    pub unit: String,

    /// Reference value.
    pub baseline: f64,

    /// Projected value.
    pub value: f64,

    /// `(value / baseline - 1) * 100`.
    pub percent_change: f64,
}

impl OutcomeResult {
    /// Creates an unadjusted result: `value == baseline`, no change.
    #[must_use]
    pub fn at_baseline(metric: &OutcomeMetric) -> Self {
        Self {
            label: metric.label.clone(),
            unit: metric.unit.clone(),
            baseline: metric.baseline,
            value: metric.baseline,
            percent_change: 0.0,
        }
    }

    /// Absolute change from baseline.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.value - self.baseline
    }

    /// Returns true if the projected value is above baseline.
    #[must_use]
    pub fn is_increase(&self) -> bool {
        self.value > self.baseline
    }

    /// Returns true if the projected value is below baseline.
    #[must_use]
    pub fn is_decrease(&self) -> bool {
        self.value < self.baseline
    }
}

/// A full calculation result: every usable configured outcome, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeSnapshot(BTreeMap<OutcomeId, OutcomeResult>);

impl OutcomeSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a result, returning the previous one for the same id.
    pub fn insert(&mut self, id: OutcomeId, result: OutcomeResult) -> Option<OutcomeResult> {
        self.0.insert(id, result)
    }

    /// Looks up an outcome by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&OutcomeResult> {
        self.0.get(id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut OutcomeResult> {
        self.0.get_mut(id)
    }

    /// Returns true if the snapshot contains the outcome.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Number of outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no outcomes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates outcomes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&OutcomeId, &OutcomeResult)> {
        self.0.iter()
    }

    /// Mutable iteration in id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&OutcomeId, &mut OutcomeResult)> {
        self.0.iter_mut()
    }

    /// Outcomes whose value differs from baseline.
    pub fn changed(&self) -> impl Iterator<Item = (&OutcomeId, &OutcomeResult)> {
        self.0.iter().filter(|(_, r)| r.value != r.baseline)
    }

    /// Consumes the snapshot, returning the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<OutcomeId, OutcomeResult> {
        self.0
    }
}

impl<'a> IntoIterator for &'a OutcomeSnapshot {
    type Item = (&'a OutcomeId, &'a OutcomeResult);
    type IntoIter = std::collections::btree_map::Iter<'a, OutcomeId, OutcomeResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
