//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short code allocation and owner-scoped link management
//! - [`services::redirect_service::RedirectService`] - Click-counting lookup and redirect decision
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
