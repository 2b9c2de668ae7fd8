//! Parkview Configuration Layer
//!
//! This crate holds the static configuration consumed by the scenario
//! calculator: baseline outcome metrics, the driver catalog, the
//! driver-to-outcome relationship table and the impact factor table.
//!
//! # Features
//!
//! - **Scenario model**: one [`ScenarioModel`] value bundling every table
//! - **Standard model**: [`ScenarioModel::standard`], a regional theme park
//! - **File loading**: JSON, TOML and YAML model documents
//! - **Validation**: advisory checks via the [`Validate`] trait
//!
//! # Example
//!
//! ```rust
//! use parkview_config::{ScenarioModel, Validate};
//!
//! let model = ScenarioModel::from_json_str(r#"{
//!     "name": "Demo",
//!     "metrics": [{"key": "ebitda", "label": "EBITDA", "unit": "$M", "baseline": 98.3}],
//!     "relationships": {"cost.labor": ["ebitda"]},
//!     "impact_factors": {"cost.labor.ebitda": -0.8}
//! }"#).unwrap();
//!
//! assert!(model.is_valid());
//! assert!(model.relationships.relates("cost.labor", "ebitda"));
//! ```
//!
//! Validation never gates calculation: a model with defects still produces a
//! best-effort snapshot, with the defective entries skipped.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod catalog;
mod error;
mod model;
mod standard;
mod tables;

// Re-export core types
pub use catalog::{DriverCategory, DriverDefinition};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use model::{ModelFormat, ScenarioModel};
pub use tables::{DriverOutcomeRelationships, ImpactFactors};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::catalog::{DriverCategory, DriverDefinition};
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::model::ScenarioModel;
    pub use crate::tables::{DriverOutcomeRelationships, ImpactFactors};
}
