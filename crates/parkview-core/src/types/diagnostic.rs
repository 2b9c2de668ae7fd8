//! Non-fatal findings raised while computing outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{DriverId, OutcomeId};

/// A recoverable problem noticed during a calculation.
///
/// None of these stop a calculation: the affected entry is skipped and the
/// rest of the snapshot is computed as usual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A configured metric has no usable baseline and was excluded.
    MalformedMetric {
        /// The metric key.
        key: OutcomeId,
        /// What is wrong with it.
        reason: String,
    },

    /// A metric key appears more than once; later rows were excluded.
    DuplicateMetric {
        /// The repeated key.
        key: OutcomeId,
    },

    /// A driver in the input has no relationship entry and had no effect.
    UnknownDriver {
        /// The driver id.
        driver: DriverId,
    },

    /// A relationship points at an outcome missing from the metric table.
    UnknownOutcome {
        /// The driver whose relationship references the outcome.
        driver: DriverId,
        /// The missing outcome.
        outcome: OutcomeId,
    },

    /// A relationship lists the same outcome more than once; the repeat was
    /// skipped.
    DuplicateRelationship {
        /// The driver whose relationship repeats the outcome.
        driver: DriverId,
        /// The repeated outcome.
        outcome: OutcomeId,
    },

    /// An impact factor was NaN or infinite and was treated as zero.
    NonFiniteFactor {
        /// The driver half of the factor key.
        driver: DriverId,
        /// The outcome half of the factor key.
        outcome: OutcomeId,
        /// The offending factor.
        value: f64,
    },

    /// A driver adjustment was NaN or infinite and was ignored.
    NonFiniteDriverValue {
        /// The driver id.
        driver: DriverId,
        /// The offending value.
        value: f64,
    },
}

impl Diagnostic {
    /// Returns true for diagnostics caused by the model rather than the input.
    #[must_use]
    pub fn is_model_defect(&self) -> bool {
        matches!(
            self,
            Self::MalformedMetric { .. }
                | Self::DuplicateMetric { .. }
                | Self::UnknownOutcome { .. }
                | Self::DuplicateRelationship { .. }
                | Self::NonFiniteFactor { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedMetric { key, reason } => {
                write!(f, "metric '{key}' excluded: {reason}")
            }
            Self::DuplicateMetric { key } => {
                write!(f, "metric '{key}' defined more than once; keeping the first")
            }
            Self::UnknownDriver { driver } => {
                write!(f, "driver '{driver}' has no configured outcomes; ignored")
            }
            Self::UnknownOutcome { driver, outcome } => {
                write!(f, "driver '{driver}' references unknown outcome '{outcome}'")
            }
            Self::DuplicateRelationship { driver, outcome } => {
                write!(f, "driver '{driver}' lists outcome '{outcome}' more than once")
            }
            Self::NonFiniteFactor {
                driver,
                outcome,
                value,
            } => {
                write!(f, "factor '{driver}.{outcome}' = {value} is not finite; treated as 0")
            }
            Self::NonFiniteDriverValue { driver, value } => {
                write!(f, "driver '{driver}' value {value} is not finite; ignored")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let d = Diagnostic::UnknownOutcome {
            driver: DriverId::new("cost.labor"),
            outcome: OutcomeId::new("payroll"),
        };
        assert_eq!(
            d.to_string(),
            "driver 'cost.labor' references unknown outcome 'payroll'"
        );
        assert!(d.is_model_defect());

        let d = Diagnostic::UnknownDriver {
            driver: DriverId::new("nonexistent.driver"),
        };
        assert!(!d.is_model_defect());

        let d = Diagnostic::NonFiniteFactor {
            driver: DriverId::new("cost.labor"),
            outcome: OutcomeId::new("ebitda"),
            value: f64::NAN,
        };
        assert_eq!(
            d.to_string(),
            "factor 'cost.labor.ebitda' = NaN is not finite; treated as 0"
        );
        assert!(d.is_model_defect());
    }

    #[test]
    fn test_serde_tagged() {
        let d = Diagnostic::DuplicateMetric {
            key: OutcomeId::new("revenue"),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "duplicate_metric");
        assert_eq!(json["key"], "revenue");
    }
}
