//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON/form deserialization and validator for
//! input validation.

pub mod health;
pub mod link;
pub mod token;
