//! Repository trait for short link data access.

use crate::domain::entities::{NewLink, OwnerId, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a link unless its code is already taken.
    ///
    /// The uniqueness check and the insert are a single atomic statement.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` if the row was inserted
    /// - `Ok(None)` if another link already holds `new_link.code`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn try_create(&self, new_link: NewLink) -> Result<Option<ShortLink>, AppError>;

    /// Returns true if a link with this code exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Finds a link by code without touching its click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link by code and increments its click count in the same statement.
    ///
    /// Returns the updated record, or `Ok(None)` (with nothing modified) if the code
    /// is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn lookup_and_touch(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Lists an owner's links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(
        &self,
        owner_id: OwnerId,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortLink>, AppError>;

    /// Counts an owner's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_owner(&self, owner_id: OwnerId) -> Result<i64, AppError>;

    /// Replaces the destination of a link the owner holds.
    ///
    /// Returns `Ok(None)` if no link matches `code` + `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_target(
        &self,
        code: &str,
        owner_id: OwnerId,
        target_url: &str,
    ) -> Result<Option<ShortLink>, AppError>;

    /// Deletes a link the owner holds.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, code: &str, owner_id: OwnerId) -> Result<bool, AppError>;
}
