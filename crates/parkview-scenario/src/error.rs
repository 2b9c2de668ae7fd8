//! Error types for scenario handling.
//!
//! Computing outcomes never fails; these errors come from loading scenario
//! files and resolving preset names.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for loading and resolving scenarios.
pub type LoadResult<T> = Result<T, ScenarioError>;

/// Errors that can occur while loading or resolving scenarios.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// A scenario file could not be read.
    #[error("Failed to read scenario file '{}': {source}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A scenario document could not be parsed.
    #[error("Failed to parse scenario file: {0}")]
    Parse(String),

    /// A scenario set contained no scenarios.
    #[error("Scenario set contains no scenarios")]
    EmptySet,

    /// A scenario had a blank name.
    #[error("Scenario #{index} has an empty name")]
    EmptyName {
        /// Position of the scenario in its set.
        index: usize,
    },

    /// Two scenarios in one set share a name.
    #[error("Duplicate scenario name '{name}'")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// No preset matched the requested name.
    #[error("Unknown preset '{name}'; available: {available}")]
    UnknownPreset {
        /// The requested name.
        name: String,
        /// Comma-separated list of preset slugs.
        available: String,
    },
}

impl ScenarioError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl ToString) -> Self {
        Self::Parse(message.to_string())
    }
}
