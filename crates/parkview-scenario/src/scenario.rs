//! Scenario definitions and scenario files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use parkview_core::{DriverId, DriverValues};

use crate::error::{LoadResult, ScenarioError};

/// A named set of driver adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Percentage adjustments by driver.
    #[serde(default)]
    pub drivers: DriverValues,
}

impl Scenario {
    /// Creates a scenario with no adjustments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            drivers: DriverValues::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Adds a driver adjustment (percent).
    #[must_use]
    pub fn with_driver(mut self, driver: impl Into<DriverId>, percent: f64) -> Self {
        self.drivers.insert(driver, percent);
        self
    }

    /// Replaces all driver adjustments.
    #[must_use]
    pub fn with_drivers(mut self, drivers: DriverValues) -> Self {
        self.drivers = drivers;
        self
    }

    /// Lower-case, hyphenated form of the name, used for lookups.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Returns true if this scenario adjusts no driver.
    #[must_use]
    pub fn is_baseline(&self) -> bool {
        self.drivers.iter().all(|(_, pct)| pct == 0.0)
    }
}

/// Lower-cases `name` and joins its alphanumeric runs with hyphens.
pub(crate) fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// A list of scenarios, as stored in a scenario file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    /// The scenarios, in file order.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    /// Checks the set: non-empty, non-blank names, unique names.
    pub fn validate(&self) -> LoadResult<()> {
        if self.scenarios.is_empty() {
            return Err(ScenarioError::EmptySet);
        }
        let mut seen = HashSet::new();
        for (index, scenario) in self.scenarios.iter().enumerate() {
            if scenario.name.trim().is_empty() {
                return Err(ScenarioError::EmptyName { index });
            }
            if !seen.insert(scenario.name.trim().to_lowercase()) {
                return Err(ScenarioError::DuplicateName {
                    name: scenario.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Loads and validates a scenario set from a JSON or YAML file.
///
/// The parser is chosen by extension; other files are tried as YAML, then JSON.
pub fn load_scenarios_from_path(path: impl AsRef<Path>) -> LoadResult<ScenarioSet> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let set: ScenarioSet = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(&data).map_err(ScenarioError::parse)?
        }
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            serde_yaml::from_str(&data).map_err(ScenarioError::parse)?
        }
        _ => serde_yaml::from_str(&data)
            .or_else(|_| serde_json::from_str(&data))
            .map_err(ScenarioError::parse)?,
    };

    set.validate()?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let scenario = Scenario::new("Wage Inflation")
            .with_description("Labor market tightens")
            .with_driver("cost.labor", 8.0);

        assert_eq!(scenario.name, "Wage Inflation");
        assert_eq!(scenario.drivers.get("cost.labor"), Some(8.0));
        assert!(!scenario.is_baseline());
        assert!(Scenario::new("Nothing").is_baseline());
    }

    #[test]
    fn test_slug() {
        assert_eq!(Scenario::new("Heat Wave").slug(), "heat-wave");
        assert_eq!(Scenario::new("  Premium   Pricing!").slug(), "premium-pricing");
        assert_eq!(slugify("Wage-Inflation 2026"), "wage-inflation-2026");
    }

    #[test]
    fn test_set_validation() {
        assert!(matches!(
            ScenarioSet::default().validate(),
            Err(ScenarioError::EmptySet)
        ));

        let set = ScenarioSet {
            scenarios: vec![Scenario::new("A"), Scenario::new(" ")],
        };
        assert!(matches!(
            set.validate(),
            Err(ScenarioError::EmptyName { index: 1 })
        ));

        let set = ScenarioSet {
            scenarios: vec![Scenario::new("Recession"), Scenario::new("recession")],
        };
        assert!(matches!(
            set.validate(),
            Err(ScenarioError::DuplicateName { .. })
        ));

        let set = ScenarioSet {
            scenarios: vec![Scenario::new("A"), Scenario::new("B")],
        };
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_deserialize_yaml() {
        let doc = r#"
scenarios:
  - name: Cold Snap
    drivers:
      external.weather: -25
      cost.energy: 15
  - name: Calm Year
"#;
        let set: ScenarioSet = serde_yaml::from_str(doc).unwrap();
        assert_eq!(set.scenarios.len(), 2);
        assert_eq!(set.scenarios[0].drivers.get("external.weather"), Some(-25.0));
        assert!(set.scenarios[1].drivers.is_empty());
    }
}
