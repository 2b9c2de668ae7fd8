//! Driver percentage adjustments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::DriverId;
use crate::error::{ParkviewError, ParkviewResult};

/// Percentage adjustments keyed by driver (`+5.0` means +5%).
///
/// Entries are kept in driver id order, so iterating a `DriverValues` is
/// deterministic no matter how it was built. Building from an iterator with a
/// repeated driver keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverValues(BTreeMap<DriverId, f64>);

impl DriverValues {
    /// Creates an empty set of adjustments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, driver: impl Into<DriverId>, percent: f64) -> Self {
        self.insert(driver, percent);
        self
    }

    /// Sets a driver's adjustment, returning the previous one.
    pub fn insert(&mut self, driver: impl Into<DriverId>, percent: f64) -> Option<f64> {
        self.0.insert(driver.into(), percent)
    }

    /// Removes a driver's adjustment.
    pub fn remove(&mut self, driver: &str) -> Option<f64> {
        self.0.remove(driver)
    }

    /// Returns a driver's adjustment.
    #[must_use]
    pub fn get(&self, driver: &str) -> Option<f64> {
        self.0.get(driver).copied()
    }

    /// Number of adjusted drivers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no driver is adjusted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates adjustments in driver id order.
    pub fn iter(&self) -> impl Iterator<Item = (&DriverId, f64)> {
        self.0.iter().map(|(id, pct)| (id, *pct))
    }

    /// Applies `other` on top of `self`; drivers present in both take `other`'s value.
    #[must_use]
    pub fn merged(mut self, other: &DriverValues) -> Self {
        for (id, pct) in other.iter() {
            self.0.insert(id.clone(), pct);
        }
        self
    }

    /// Parses a `driver=percent` assignment, as accepted on the command line.
    ///
    /// ```rust
    /// use parkview_core::DriverValues;
    ///
    /// let (id, pct) = DriverValues::parse_assignment("cost.labor=+10").unwrap();
    /// assert_eq!(id.as_str(), "cost.labor");
    /// assert_eq!(pct, 10.0);
    /// ```
    pub fn parse_assignment(input: &str) -> ParkviewResult<(DriverId, f64)> {
        let (id, pct) = input
            .split_once('=')
            .ok_or_else(|| ParkviewError::invalid_assignment(input, "expected '<driver>=<percent>'"))?;

        let id = DriverId::parse(id)
            .map_err(|_| ParkviewError::invalid_assignment(input, "driver id is empty"))?;

        let raw = pct.trim().trim_end_matches('%');
        let pct: f64 = raw
            .parse()
            .map_err(|_| ParkviewError::invalid_assignment(input, format!("'{raw}' is not a number")))?;

        if !pct.is_finite() {
            return Err(ParkviewError::NonFiniteDriverValue {
                driver: id.to_string(),
                value: pct,
            });
        }

        Ok((id, pct))
    }
}

impl<K: Into<DriverId>> FromIterator<(K, f64)> for DriverValues {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<DriverId>> Extend<(K, f64)> for DriverValues {
    fn extend<I: IntoIterator<Item = (K, f64)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.0.insert(k.into(), v);
        }
    }
}

impl<'a> IntoIterator for &'a DriverValues {
    type Item = (&'a DriverId, &'a f64);
    type IntoIter = std::collections::btree_map::Iter<'a, DriverId, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_is_sorted_regardless_of_insert_order() {
        let a = DriverValues::new()
            .with("revenue.ticketPrice", 5.0)
            .with("cost.labor", 10.0)
            .with("external.weather", -3.0);
        let b: DriverValues = vec![
            ("external.weather", -3.0),
            ("cost.labor", 10.0),
            ("revenue.ticketPrice", 5.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(a, b);
        let ids: Vec<&str> = a.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["cost.labor", "external.weather", "revenue.ticketPrice"]
        );
    }

    #[test]
    fn test_last_value_wins() {
        let values: DriverValues = vec![("cost.labor", 10.0), ("cost.labor", 4.0)]
            .into_iter()
            .collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("cost.labor"), Some(4.0));
    }

    #[test]
    fn test_merged_overrides() {
        let preset = DriverValues::new().with("cost.labor", 10.0).with("cost.energy", 20.0);
        let explicit = DriverValues::new().with("cost.labor", 2.0);
        let merged = preset.merged(&explicit);
        assert_eq!(merged.get("cost.labor"), Some(2.0));
        assert_eq!(merged.get("cost.energy"), Some(20.0));
    }

    #[test]
    fn test_parse_assignment() {
        let (id, pct) = DriverValues::parse_assignment(" external.weather = -12.5% ").unwrap();
        assert_eq!(id.as_str(), "external.weather");
        assert_eq!(pct, -12.5);

        assert!(DriverValues::parse_assignment("cost.labor").is_err());
        assert!(DriverValues::parse_assignment("=5").is_err());
        assert!(DriverValues::parse_assignment("cost.labor=lots").is_err());
        assert!(matches!(
            DriverValues::parse_assignment("cost.labor=inf"),
            Err(ParkviewError::NonFiniteDriverValue { .. })
        ));
    }

    #[test]
    fn test_serde_transparent_map() {
        let values = DriverValues::new().with("cost.labor", 10.0);
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"cost.labor":10.0}"#);
        let back: DriverValues = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
