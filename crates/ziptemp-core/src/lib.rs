//! # ziptemp-core: Domain Primitives
//!
//! Request-scoped value objects shared by the temperature service, the
//! input gateway, and the outbound lookup clients:
//!
//! - [`ZipCode`]: an 8-digit postal code, validated at construction.
//! - [`Location`]: a resolved, non-empty place name.
//! - [`TemperatureReading`]: Celsius/Fahrenheit as reported upstream plus
//!   the derived Kelvin value.
//!
//! None of these types carry shared state. They are built while handling
//! one request and dropped once the response is written.

pub mod error;
pub mod location;
pub mod temperature;
pub mod zipcode;

pub use error::ValidationError;
pub use location::Location;
pub use temperature::{celsius_to_kelvin, TemperatureReading, KELVIN_OFFSET};
pub use zipcode::{is_valid_zipcode, ZipCode, ZIP_CODE_LEN};
