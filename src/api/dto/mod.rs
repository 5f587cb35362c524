//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod classify;
pub mod health;
pub mod links;
pub mod pagination;
pub mod trusted_domain;
