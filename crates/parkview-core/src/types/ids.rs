//! Identifier newtypes.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::{ParkviewError, ParkviewResult};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier without validation.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parses an identifier, trimming whitespace and rejecting empty input.
            pub fn parse(s: &str) -> ParkviewResult<Self> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ParkviewError::invalid_identifier($kind, s));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParkviewError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a driver, e.g. `cost.labor` or `external.weather`.
    ///
    /// Driver ids are conventionally `<category>.<name>` and may contain dots.
    DriverId,
    "driver"
);

string_id!(
    /// Identifier of an outcome metric, e.g. `revenue`, `ebitda`, `laborCost`.
    ///
    /// Outcome ids never contain dots; see [`ImpactKey`].
    OutcomeId,
    "outcome"
);

/// Composite key addressing the impact coefficient of one driver on one outcome.
///
/// The textual form is `"<driver>.<outcome>"`. Since driver ids contain dots
/// themselves, the text is split at its last dot:
///
/// ```rust
/// use parkview_core::ImpactKey;
///
/// let key: ImpactKey = "cost.labor.ebitda".parse().unwrap();
/// assert_eq!(key.driver().as_str(), "cost.labor");
/// assert_eq!(key.outcome().as_str(), "ebitda");
/// assert_eq!(key.to_string(), "cost.labor.ebitda");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImpactKey {
    driver: DriverId,
    outcome: OutcomeId,
}

impl ImpactKey {
    /// Creates a key from its parts.
    #[must_use]
    pub fn new(driver: impl Into<DriverId>, outcome: impl Into<OutcomeId>) -> Self {
        Self {
            driver: driver.into(),
            outcome: outcome.into(),
        }
    }

    /// Parses `"<driver>.<outcome>"`, splitting at the last dot.
    pub fn parse(s: &str) -> ParkviewResult<Self> {
        let (driver, outcome) = s
            .trim()
            .rsplit_once('.')
            .ok_or_else(|| ParkviewError::invalid_impact_key(s))?;
        if driver.trim().is_empty() || outcome.trim().is_empty() {
            return Err(ParkviewError::invalid_impact_key(s));
        }
        Ok(Self::new(driver.trim(), outcome.trim()))
    }

    /// The driver half of the key.
    #[must_use]
    pub fn driver(&self) -> &DriverId {
        &self.driver
    }

    /// The outcome half of the key.
    #[must_use]
    pub fn outcome(&self) -> &OutcomeId {
        &self.outcome
    }

    /// Splits the key into its driver and outcome.
    #[must_use]
    pub fn into_parts(self) -> (DriverId, OutcomeId) {
        (self.driver, self.outcome)
    }
}

impl fmt::Display for ImpactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.driver, self.outcome)
    }
}

impl FromStr for ImpactKey {
    type Err = ParkviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ImpactKey {
    type Error = ParkviewError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ImpactKey> for String {
    fn from(key: ImpactKey) -> Self {
        key.to_string()
    }
}
