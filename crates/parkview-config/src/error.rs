//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A model file could not be read.
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A model document could not be parsed.
    #[error("Failed to parse {format} model: {message}")]
    Parse {
        /// The format being parsed (json, toml, yaml).
        format: &'static str,
        /// Parser message.
        message: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {0:?}")]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Lookup of a named entry failed.
    #[error("Configuration not found: {key}")]
    NotFound {
        /// The key that was not found.
        key: String,
    },
}

impl ConfigError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(format: &'static str, message: impl ToString) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            ConfigError::parse("json", err)
        } else {
            ConfigError::Serialization(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::parse("yaml", err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::parse("toml", err)
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ConfigError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysBroken(usize);

    impl Validate for AlwaysBroken {
        fn validate(&self) -> Vec<ValidationError> {
            (0..self.0)
                .map(|i| ValidationError::with_rule(format!("field{i}"), "broken", "never_valid"))
                .collect()
        }
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("metrics", "empty");
        assert_eq!(err.to_string(), "metrics: empty");

        let err = ValidationError::with_rule("drivers[0].min", "above max", "range_order");
        assert_eq!(err.to_string(), "drivers[0].min: above max (rule: range_order)");
    }

    #[test]
    fn test_validate_or_error() {
        assert!(AlwaysBroken(0).validate_or_error().is_ok());
        assert!(AlwaysBroken(0).is_valid());

        match AlwaysBroken(1).validate_or_error() {
            Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "field0"),
            other => panic!("unexpected: {other:?}"),
        }

        match AlwaysBroken(3).validate_or_error() {
            Err(ConfigError::MultipleValidationErrors(errs)) => assert_eq!(errs.len(), 3),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let err: ConfigError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConfigError::Parse { format: "json", .. }));
    }
}
