//! # Zip Codes
//!
//! A Brazilian CEP in its compact form: exactly eight ASCII digits, no
//! separators, no surrounding whitespace. `"01001000"` is valid,
//! `"01001-000"` and `" 01001000"` are not.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of digits in a zip code.
pub const ZIP_CODE_LEN: usize = 8;

/// Check whether `value` is exactly [`ZIP_CODE_LEN`] ASCII digits.
///
/// Equivalent to matching `^[0-9]{8}$`. Pure and deterministic.
pub fn is_valid_zipcode(value: &str) -> bool {
    value.len() == ZIP_CODE_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// A validated zip code.
///
/// Construction goes through [`ZipCode::new`] (or `TryFrom<String>` when
/// deserializing), so holding a `ZipCode` means the format check passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZipCode(String);

impl ZipCode {
    /// Create a zip code, validating the 8-digit format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidZipCode`] if the value is not
    /// exactly eight ASCII digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !is_valid_zipcode(&s) {
            return Err(ValidationError::InvalidZipCode(s));
        }
        Ok(Self(s))
    }

    /// Access the zip code digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ZipCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZipCode> for String {
    fn from(zip: ZipCode) -> Self {
        zip.0
    }
}

impl std::str::FromStr for ZipCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for ZipCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
