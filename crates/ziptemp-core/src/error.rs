//! # Validation Errors
//!
//! Raised when a domain primitive is constructed from a value that does not
//! satisfy its format rules.

use thiserror::Error;

/// Domain primitive validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Zip code is not exactly eight ASCII digits.
    #[error("invalid zipcode: \"{0}\" (expected exactly 8 digits)")]
    InvalidZipCode(String),

    /// Location name is empty.
    #[error("location name must not be empty")]
    EmptyLocation,
}
