//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and format checks
//! - [`token`] - API token generation and HMAC hashing

pub mod code_generator;
pub mod token;
