//! Repository trait definitions for the domain layer.
//!
//! Traits define the data contracts; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated with
//! `mockall` for service tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage, lookup-and-touch, owner-scoped CRUD
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod link_repository;
pub mod token_repository;

pub use link_repository::LinkRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
