//! Error types for the Parkview core types.
//!
//! The outcome calculator itself never fails; these errors cover parsing and
//! constructing the identifiers and inputs that feed it.

use thiserror::Error;

/// A specialized Result type for Parkview core operations.
pub type ParkviewResult<T> = Result<T, ParkviewError>;

/// The main error type for Parkview core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParkviewError {
    /// An identifier was empty or contained only whitespace.
    #[error("Invalid {kind} identifier: '{value}'")]
    InvalidIdentifier {
        /// Which identifier kind was being parsed (driver, outcome).
        kind: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A composite `driver.outcome` impact key could not be split.
    #[error("Invalid impact key '{key}': expected '<driver>.<outcome>'")]
    InvalidImpactKey {
        /// The rejected key.
        key: String,
    },

    /// A driver assignment (`id=percent`) could not be parsed.
    #[error("Invalid driver assignment '{input}': {reason}")]
    InvalidDriverAssignment {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A driver percentage was NaN or infinite.
    #[error("Driver '{driver}' has a non-finite value: {value}")]
    NonFiniteDriverValue {
        /// The driver identifier.
        driver: String,
        /// The offending value.
        value: f64,
    },
}

impl ParkviewError {
    /// Creates an invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            kind,
            value: value.into(),
        }
    }

    /// Creates an invalid impact key error.
    #[must_use]
    pub fn invalid_impact_key(key: impl Into<String>) -> Self {
        Self::InvalidImpactKey { key: key.into() }
    }

    /// Creates an invalid driver assignment error.
    #[must_use]
    pub fn invalid_assignment(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDriverAssignment {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParkviewError::invalid_identifier("driver", "  ");
        assert!(err.to_string().contains("driver"));

        let err = ParkviewError::invalid_impact_key("labor");
        assert!(err.to_string().contains("labor"));
        assert!(err.to_string().contains("<driver>.<outcome>"));

        let err = ParkviewError::invalid_assignment("cost.labor", "missing '='");
        assert!(err.to_string().contains("cost.labor"));
        assert!(err.to_string().contains("missing '='"));
    }

    #[test]
    fn test_error_clone() {
        let err = ParkviewError::NonFiniteDriverValue {
            driver: "cost.energy".to_string(),
            value: f64::INFINITY,
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
