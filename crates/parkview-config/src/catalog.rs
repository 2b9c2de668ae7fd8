//! Driver catalog: display metadata for scenario inputs.
//!
//! The catalog describes how a front end should present each driver (label,
//! category, slider range). It has no influence on the calculation: values
//! outside `[min, max]` are accepted by the calculator as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

use parkview_core::DriverId;

/// Grouping used to organize drivers in the scenario screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverCategory {
    /// Operating costs (labor, energy, maintenance).
    Cost,
    /// Pricing and in-park spending.
    Revenue,
    /// Marketing spend and mix.
    Marketing,
    /// Capacity and operating hours.
    Operations,
    /// Factors outside the operator's control (weather, economy, tourism).
    External,
    /// Environmental programs.
    Sustainability,
}

impl DriverCategory {
    /// All categories in display order.
    pub const ALL: [DriverCategory; 6] = [
        Self::Cost,
        Self::Revenue,
        Self::Marketing,
        Self::Operations,
        Self::External,
        Self::Sustainability,
    ];

    /// Infers the category from a `<category>.<name>` driver id.
    #[must_use]
    pub fn from_driver_id(id: &DriverId) -> Option<Self> {
        let prefix = id.as_str().split('.').next()?;
        Self::parse(prefix)
    }

    /// Parses a category name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cost" | "costs" => Some(Self::Cost),
            "revenue" => Some(Self::Revenue),
            "marketing" => Some(Self::Marketing),
            "operations" | "ops" => Some(Self::Operations),
            "external" | "weather" => Some(Self::External),
            "sustainability" | "esg" => Some(Self::Sustainability),
            _ => None,
        }
    }

    /// Returns the string identifier for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Revenue => "revenue",
            Self::Marketing => "marketing",
            Self::Operations => "operations",
            Self::External => "external",
            Self::Sustainability => "sustainability",
        }
    }
}

impl fmt::Display for DriverCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDefinition {
    /// Driver identifier.
    pub id: DriverId,

    /// Display name.
    pub label: String,

    /// Grouping.
    pub category: DriverCategory,

    /// Lowest suggested adjustment (%).
    #[serde(default = "default_min")]
    pub min: f64,

    /// Highest suggested adjustment (%).
    #[serde(default = "default_max")]
    pub max: f64,

    /// Slider increment (%).
    #[serde(default = "default_step")]
    pub step: f64,

    /// Initial adjustment (%).
    #[serde(default)]
    pub default: f64,

    /// Longer explanation shown as a tooltip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_min() -> f64 {
    -50.0
}

fn default_max() -> f64 {
    50.0
}

fn default_step() -> f64 {
    1.0
}

impl DriverDefinition {
    /// Creates a definition with the default `[-50, 50]` range.
    #[must_use]
    pub fn new(id: impl Into<DriverId>, label: impl Into<String>, category: DriverCategory) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
            min: default_min(),
            max: default_max(),
            step: default_step(),
            default: 0.0,
            description: None,
        }
    }

    /// Sets the suggested range.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Sets the slider increment.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Returns true if `percent` lies within the suggested range.
    #[must_use]
    pub fn in_range(&self, percent: f64) -> bool {
        (self.min..=self.max).contains(&percent)
    }

    /// Clamps `percent` into the suggested range, for slider-style inputs.
    #[must_use]
    pub fn clamp(&self, percent: f64) -> f64 {
        if self.min > self.max {
            return percent;
        }
        percent.clamp(self.min, self.max)
    }
}
