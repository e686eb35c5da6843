//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization with camelCase keys, and
//! validator for request input validation.

pub mod health;
pub mod link;
