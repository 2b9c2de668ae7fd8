//! CLI error types.

use thiserror::Error;

use parkview_core::ParkviewError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A `--driver` argument could not be parsed.
    #[error("Invalid driver argument: {0}. Use ID=PCT, e.g. cost.labor=10.")]
    InvalidDriver(#[from] ParkviewError),

    /// No preset with the given name.
    #[error("Unknown preset '{name}'. Run `parkview presets` to list them.")]
    UnknownPreset {
        /// Requested name.
        name: String,
    },

    /// The requested focus or filter outcome is not in the model.
    #[error("Unknown outcome '{0}'")]
    UnknownOutcome(String),

    /// The active model failed validation.
    #[error("Model validation failed with {0} error(s)")]
    ValidationFailed(usize),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
