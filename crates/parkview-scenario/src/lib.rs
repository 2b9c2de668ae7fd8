//! Parkview Scenario Modeling
//!
//! Driver-based what-if analysis for attraction operators.
//!
//! # Overview
//!
//! A [`ScenarioModel`](parkview_config::ScenarioModel) describes baseline
//! outcome metrics and how each operational driver moves them. This crate
//! applies percentage driver adjustments to that model:
//!
//! - **Calculator**: [`compute_outcomes`] projects every outcome metric
//! - **Scenarios**: named adjustment sets, built-in [`presets`] and scenario files
//! - **Comparison**: [`run_scenarios`], [`worst_case`], [`best_case`], [`summarize_results`]
//! - **Attribution**: [`attribute_impacts`] splits each change by driver
//!
//! # Example
//!
//! ```rust
//! use parkview_config::ScenarioModel;
//! use parkview_core::DriverValues;
//! use parkview_scenario::compute_outcomes;
//!
//! let model = ScenarioModel::standard();
//! let drivers = DriverValues::new()
//!     .with("cost.labor", 10.0)
//!     .with("external.weather", -15.0);
//!
//! let snapshot = compute_outcomes(&model, &drivers);
//! for (id, result) in snapshot.changed() {
//!     println!("{id}: {:.1} ({:+.2}%)", result.value, result.percent_change);
//! }
//! ```
//!
//! # Features
//!
//! - `parallel`: run large scenario batches on the rayon thread pool

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod attribution;
mod calculator;
mod compare;
mod error;
pub mod presets;
mod scenario;

pub use attribution::{attribute_impacts, top_drivers, ImpactContribution};
pub use calculator::{compute_outcomes, compute_outcomes_with_diagnostics, linear_impact};
pub use compare::{
    best_case, run_scenario, run_scenarios, summarize_results, worst_case, ScenarioResult,
    ScenarioSummary, PARALLEL_THRESHOLD,
};
pub use error::{LoadResult, ScenarioError};
pub use scenario::{load_scenarios_from_path, Scenario, ScenarioSet};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::attribution::{attribute_impacts, ImpactContribution};
    pub use crate::calculator::compute_outcomes;
    pub use crate::compare::{run_scenarios, summarize_results, ScenarioResult};
    pub use crate::scenario::Scenario;
    pub use parkview_config::ScenarioModel;
    pub use parkview_core::{DriverValues, OutcomeSnapshot};
}
