//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Field names follow the camelCase contract of the
//! bundled web page.

pub mod health;
pub mod inspect;
pub mod qr;
pub mod shorten;
