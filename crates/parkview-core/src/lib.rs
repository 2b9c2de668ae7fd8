//! # Parkview Core
//!
//! Core types for the Parkview scenario modeling toolkit.
//!
//! This crate provides the building blocks shared by every other Parkview crate:
//!
//! - **Identifiers**: [`DriverId`] and [`OutcomeId`] newtypes, plus the composite
//!   [`ImpactKey`] used to address a driver/outcome coefficient
//! - **Metrics**: configured [`MetricDefinition`] rows and validated [`OutcomeMetric`]s
//! - **Results**: [`OutcomeResult`] and the full [`OutcomeSnapshot`]
//! - **Inputs**: [`DriverValues`], percentage adjustments keyed by driver
//! - **Diagnostics**: non-fatal [`Diagnostic`] records raised during a calculation
//!
//! ## Example
//!
//! ```rust
//! use parkview_core::prelude::*;
//!
//! let drivers = DriverValues::new()
//!     .with("cost.labor", 10.0)
//!     .with("external.weather", -5.0);
//!
//! assert_eq!(drivers.len(), 2);
//! assert_eq!(drivers.get("cost.labor"), Some(10.0));
//! assert_eq!(parkview_core::percent_change(98.3, 90.436).round(), -8.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ParkviewError, ParkviewResult};
    pub use crate::types::{
        Diagnostic, DriverId, DriverValues, ImpactKey, MetricDefinition, OutcomeId,
        OutcomeMetric, OutcomeResult, OutcomeSnapshot,
    };
}

// Re-export commonly used types at crate root
pub use error::{ParkviewError, ParkviewResult};
pub use types::{
    percent_change, Diagnostic, DriverId, DriverValues, ImpactKey, MetricDefinition, OutcomeId,
    OutcomeMetric, OutcomeResult, OutcomeSnapshot,
};
