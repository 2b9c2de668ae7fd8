//! Driver/outcome lookup tables.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::warn;

use parkview_core::{DriverId, ImpactKey, OutcomeId};

/// Which outcomes each driver affects, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverOutcomeRelationships(BTreeMap<DriverId, Vec<OutcomeId>>);

impl DriverOutcomeRelationships {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of one driver's outcome list.
    #[must_use]
    pub fn with<I, O>(mut self, driver: impl Into<DriverId>, outcomes: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<OutcomeId>,
    {
        self.insert(driver, outcomes);
        self
    }

    /// Sets a driver's outcome list, replacing any previous one.
    pub fn insert<I, O>(&mut self, driver: impl Into<DriverId>, outcomes: I)
    where
        I: IntoIterator<Item = O>,
        O: Into<OutcomeId>,
    {
        self.0
            .insert(driver.into(), outcomes.into_iter().map(Into::into).collect());
    }

    /// Outcomes affected by `driver`, or `None` for an unknown driver.
    #[must_use]
    pub fn outcomes_for(&self, driver: &str) -> Option<&[OutcomeId]> {
        self.0.get(driver).map(Vec::as_slice)
    }

    /// Returns true if `driver` has an entry.
    #[must_use]
    pub fn contains_driver(&self, driver: &str) -> bool {
        self.0.contains_key(driver)
    }

    /// Returns true if `driver` lists `outcome`.
    #[must_use]
    pub fn relates(&self, driver: &str, outcome: &str) -> bool {
        self.0
            .get(driver)
            .is_some_and(|outs| outs.iter().any(|o| o.as_str() == outcome))
    }

    /// Drivers that list `outcome`, in driver id order.
    pub fn drivers_affecting<'a>(&'a self, outcome: &'a str) -> impl Iterator<Item = &'a DriverId> {
        self.0
            .iter()
            .filter(move |(_, outs)| outs.iter().any(|o| o.as_str() == outcome))
            .map(|(d, _)| d)
    }

    /// Iterates entries in driver id order.
    pub fn iter(&self) -> impl Iterator<Item = (&DriverId, &[OutcomeId])> {
        self.0.iter().map(|(d, outs)| (d, outs.as_slice()))
    }

    /// Number of drivers with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Linear sensitivity coefficients keyed by `driver.outcome`.
///
/// A missing entry means the driver has no effect on that outcome. Entries
/// whose key does not split into a driver and an outcome, or whose value is
/// not a number, are dropped while loading and kept in [`rejected`](Self::rejected).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpactFactors {
    by_driver: BTreeMap<DriverId, BTreeMap<OutcomeId, f64>>,
    rejected: Vec<String>,
}

impl ImpactFactors {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(
        mut self,
        driver: impl Into<DriverId>,
        outcome: impl Into<OutcomeId>,
        factor: f64,
    ) -> Self {
        self.insert(driver, outcome, factor);
        self
    }

    /// Sets a coefficient, returning the previous one.
    pub fn insert(
        &mut self,
        driver: impl Into<DriverId>,
        outcome: impl Into<OutcomeId>,
        factor: f64,
    ) -> Option<f64> {
        self.by_driver
            .entry(driver.into())
            .or_default()
            .insert(outcome.into(), factor)
    }

    /// Coefficient for `driver` on `outcome`, if configured.
    #[must_use]
    pub fn get(&self, driver: &str, outcome: &str) -> Option<f64> {
        self.by_driver.get(driver)?.get(outcome).copied()
    }

    /// Coefficient for `driver` on `outcome`, defaulting to zero.
    #[must_use]
    pub fn factor(&self, driver: &str, outcome: &str) -> f64 {
        self.get(driver, outcome).unwrap_or(0.0)
    }

    /// Iterates coefficients in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&DriverId, &OutcomeId, f64)> {
        self.by_driver
            .iter()
            .flat_map(|(d, outs)| outs.iter().map(move |(o, f)| (d, o, *f)))
    }

    /// Raw keys of entries dropped while loading.
    #[must_use]
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Number of configured coefficients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_driver.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no coefficient is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for ImpactFactors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.iter()
                .map(|(d, o, f)| (ImpactKey::new(d, o).to_string(), f)),
        )
    }
}

impl<'de> Deserialize<'de> for ImpactFactors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Other(serde::de::IgnoredAny),
        }

        let mut factors = Self::new();
        for (key, value) in BTreeMap::<String, Raw>::deserialize(deserializer)? {
            match (ImpactKey::parse(&key), value) {
                (Ok(parsed), Raw::Number(factor)) => {
                    let (driver, outcome) = parsed.into_parts();
                    factors.insert(driver, outcome, factor);
                }
                (Err(_), _) => {
                    warn!(key = %key, "skipping impact factor with malformed key");
                    factors.rejected.push(key);
                }
                (Ok(_), Raw::Other(_)) => {
                    warn!(key = %key, "skipping non-numeric impact factor");
                    factors.rejected.push(key);
                }
            }
        }
        Ok(factors)
    }
}
