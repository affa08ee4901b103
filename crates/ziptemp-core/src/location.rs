//! # Resolved Locations
//!
//! The directory service answers unknown zip codes with HTTP 200 and an
//! empty place name, so an empty name is a "not found" signal and never a
//! usable location. [`Location::new`] enforces that.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A human-readable place name resolved from a zip code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location(String);

impl Location {
    /// Create a location from a place name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyLocation`] if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyLocation);
        }
        Ok(Self(name))
    }

    /// The place name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Location {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
