//! The scenario model: metric table, driver catalog and impact tables.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use parkview_core::{DriverId, MetricDefinition, OutcomeId};

use crate::catalog::{DriverCategory, DriverDefinition};
use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::tables::{DriverOutcomeRelationships, ImpactFactors};

// =============================================================================
// FILE FORMATS
// =============================================================================

/// Document formats a model can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
    /// YAML document.
    Yaml,
}

impl ModelFormat {
    /// Detects the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Some(Self::Yaml)
        } else {
            None
        }
    }

    /// Returns the format name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
        }
    }
}

// =============================================================================
// SCENARIO MODEL
// =============================================================================

/// Static configuration consumed by the outcome calculator.
///
/// Loaded once, then only read. Each table is plain data; see
/// [`ScenarioModel::standard`] for the built-in attraction-operator model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioModel {
    /// Model name.
    #[serde(default)]
    pub name: String,

    /// Description of this model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Baseline outcome metrics.
    #[serde(default)]
    pub metrics: Vec<MetricDefinition>,

    /// Driver display metadata.
    #[serde(default)]
    pub drivers: Vec<DriverDefinition>,

    /// Outcomes affected by each driver.
    #[serde(default)]
    pub relationships: DriverOutcomeRelationships,

    /// Linear sensitivity coefficients keyed by `driver.outcome`.
    #[serde(default)]
    pub impact_factors: ImpactFactors,
}

impl ScenarioModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Adds a metric row.
    #[must_use]
    pub fn with_metric(mut self, metric: MetricDefinition) -> Self {
        self.metrics.push(metric);
        self
    }

    /// Adds a driver to the catalog.
    #[must_use]
    pub fn with_driver(mut self, driver: DriverDefinition) -> Self {
        self.drivers.push(driver);
        self
    }

    /// Replaces the relationship table.
    #[must_use]
    pub fn with_relationships(mut self, relationships: DriverOutcomeRelationships) -> Self {
        self.relationships = relationships;
        self
    }

    /// Replaces the impact factor table.
    #[must_use]
    pub fn with_impact_factors(mut self, factors: ImpactFactors) -> Self {
        self.impact_factors = factors;
        self
    }

    // =========================================================================
    // LOADING
    // =========================================================================

    /// Loads a model from a file, choosing the parser by extension.
    ///
    /// Files without a recognized extension are tried as YAML, then JSON.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let model = match ModelFormat::from_path(path) {
            Some(format) => Self::from_str_as(&data, format)?,
            None => Self::from_yaml_str(&data).or_else(|_| Self::from_json_str(&data))?,
        };

        debug!(
            path = %path.display(),
            metrics = model.metrics.len(),
            drivers = model.relationships.len(),
            factors = model.impact_factors.len(),
            "loaded scenario model"
        );
        Ok(model)
    }

    /// Parses a model in the given format.
    pub fn from_str_as(data: &str, format: ModelFormat) -> ConfigResult<Self> {
        match format {
            ModelFormat::Json => Self::from_json_str(data),
            ModelFormat::Toml => Self::from_toml_str(data),
            ModelFormat::Yaml => Self::from_yaml_str(data),
        }
    }

    /// Parses a JSON model.
    pub fn from_json_str(data: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Parses a TOML model.
    pub fn from_toml_str(data: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(data)?)
    }

    /// Parses a YAML model.
    pub fn from_yaml_str(data: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(data)?)
    }

    /// Serializes the model as pretty JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    // =========================================================================
    // LOOKUPS
    // =========================================================================

    /// First metric row with the given key.
    #[must_use]
    pub fn metric(&self, key: &str) -> Option<&MetricDefinition> {
        self.metrics.iter().find(|m| m.key.as_str() == key)
    }

    /// Catalog entry for a driver.
    #[must_use]
    pub fn driver(&self, id: &str) -> Option<&DriverDefinition> {
        self.drivers.iter().find(|d| d.id.as_str() == id)
    }

    /// Catalog entry for a driver, or an error naming the missing id.
    pub fn require_driver(&self, id: &str) -> ConfigResult<&DriverDefinition> {
        self.driver(id)
            .ok_or_else(|| ConfigError::not_found(format!("driver '{id}'")))
    }

    /// Catalog entries grouped by category, categories in display order.
    #[must_use]
    pub fn drivers_by_category(&self) -> BTreeMap<DriverCategory, Vec<&DriverDefinition>> {
        let mut grouped: BTreeMap<DriverCategory, Vec<&DriverDefinition>> = BTreeMap::new();
        for driver in &self.drivers {
            grouped.entry(driver.category).or_default().push(driver);
        }
        grouped
    }

    /// Every driver id known to the model (relationships or catalog), sorted.
    #[must_use]
    pub fn driver_ids(&self) -> Vec<DriverId> {
        let mut ids: Vec<DriverId> = self
            .relationships
            .iter()
            .map(|(d, _)| d.clone())
            .chain(self.drivers.iter().map(|d| d.id.clone()))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Metric keys in table order.
    #[must_use]
    pub fn outcome_ids(&self) -> Vec<&OutcomeId> {
        self.metrics.iter().map(|m| &m.key).collect()
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

impl Validate for ScenarioModel {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.metrics.is_empty() {
            errors.push(ValidationError::with_rule(
                "metrics",
                "Model defines no outcome metrics",
                "non_empty",
            ));
        }

        let mut seen = HashSet::new();
        let mut usable = HashSet::new();
        for (i, metric) in self.metrics.iter().enumerate() {
            if metric.key.as_str().trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("metrics[{i}].key"),
                    "Metric key cannot be empty",
                ));
            }
            if let Some(defect) = metric.defect() {
                errors.push(ValidationError::with_rule(
                    format!("metrics[{i}].baseline"),
                    format!("Metric '{}': {defect}", metric.key),
                    "numeric_baseline",
                ));
            } else {
                usable.insert(metric.key.as_str());
            }
            if !seen.insert(metric.key.as_str()) {
                errors.push(ValidationError::with_rule(
                    format!("metrics[{i}].key"),
                    format!("Duplicate metric key '{}'", metric.key),
                    "unique_metric",
                ));
            }
        }

        for (driver, outcomes) in self.relationships.iter() {
            let mut listed = HashSet::new();
            for outcome in outcomes {
                if !usable.contains(outcome.as_str()) {
                    errors.push(ValidationError::with_rule(
                        format!("relationships.{driver}"),
                        format!("Unknown outcome '{outcome}'"),
                        "known_outcome",
                    ));
                }
                if !listed.insert(outcome.as_str()) {
                    errors.push(ValidationError::with_rule(
                        format!("relationships.{driver}"),
                        format!("Outcome '{outcome}' listed more than once"),
                        "unique_outcome",
                    ));
                }
            }
            if !self.drivers.is_empty() && self.driver(driver.as_str()).is_none() {
                errors.push(ValidationError::with_rule(
                    format!("relationships.{driver}"),
                    "Driver is missing from the catalog",
                    "cataloged_driver",
                ));
            }
        }

        for key in self.impact_factors.rejected() {
            errors.push(ValidationError::with_rule(
                format!("impact_factors.{key}"),
                "Entry needs a `driver.outcome` key and a numeric factor; it was skipped",
                "impact_key",
            ));
        }

        for (driver, outcome, factor) in self.impact_factors.iter() {
            if !factor.is_finite() {
                errors.push(ValidationError::with_rule(
                    format!("impact_factors.{driver}.{outcome}"),
                    format!("Factor {factor} is not finite"),
                    "finite_factor",
                ));
            }
            if !self
                .relationships
                .relates(driver.as_str(), outcome.as_str())
            {
                errors.push(ValidationError::with_rule(
                    format!("impact_factors.{driver}.{outcome}"),
                    "Factor has no matching relationship and will never apply",
                    "related_factor",
                ));
            }
        }

        let mut cataloged = HashSet::new();
        for (i, driver) in self.drivers.iter().enumerate() {
            if !cataloged.insert(driver.id.as_str()) {
                errors.push(ValidationError::with_rule(
                    format!("drivers[{i}].id"),
                    format!("Duplicate driver '{}'", driver.id),
                    "unique_driver",
                ));
            }
            if driver.min > driver.max {
                errors.push(ValidationError::with_rule(
                    format!("drivers[{i}].min"),
                    format!(
                        "Driver '{}': min {} exceeds max {}",
                        driver.id, driver.min, driver.max
                    ),
                    "range_order",
                ));
            } else if !driver.in_range(driver.default) {
                errors.push(ValidationError::with_rule(
                    format!("drivers[{i}].default"),
                    format!(
                        "Driver '{}': default {} outside [{}, {}]",
                        driver.id, driver.default, driver.min, driver.max
                    ),
                    "default_in_range",
                ));
            }
            if driver.step <= 0.0 {
                errors.push(ValidationError::with_rule(
                    format!("drivers[{i}].step"),
                    format!("Driver '{}': step must be positive", driver.id),
                    "positive_step",
                ));
            }
        }

        errors
    }
}
