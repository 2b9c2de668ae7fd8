//! Domain types for scenario modeling.
//!
//! - [`DriverId`], [`OutcomeId`]: string identifiers for drivers and outcome metrics
//! - [`ImpactKey`]: a `driver.outcome` pair addressing one impact coefficient
//! - [`MetricDefinition`], [`OutcomeMetric`]: configured and validated metric rows
//! - [`OutcomeResult`], [`OutcomeSnapshot`]: calculation output
//! - [`DriverValues`]: percentage adjustments supplied by the caller
//! - [`Diagnostic`]: non-fatal findings raised while calculating

mod diagnostic;
mod driver;
mod ids;
mod metric;

pub use diagnostic::Diagnostic;
pub use driver::DriverValues;
pub use ids::{DriverId, ImpactKey, OutcomeId};
pub use metric::{percent_change, MetricDefinition, OutcomeMetric, OutcomeResult, OutcomeSnapshot};
