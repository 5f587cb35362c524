//! Link allocation and owner-scoped link management.

use std::sync::Arc;

use crate::domain::entities::{NewLink, OwnerId, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use serde_json::json;
use url::Url;

/// Number of candidate codes tried before giving up on an allocation.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Longest destination URL accepted on create or edit.
pub const MAX_TARGET_URL_LENGTH: usize = 2048;

/// One page of an owner's links.
#[derive(Debug, Clone)]
pub struct LinkPage {
    pub links: Vec<ShortLink>,
    pub total: i64,
}

/// Service for creating and managing short links.
///
/// Code uniqueness is enforced by the repository's atomic insert-or-reject; the
/// retry loop in [`Self::allocate`] only picks a fresh candidate after a conflict.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    base_url: String,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin short URLs are built from.
    pub fn new(link_repository: Arc<L>, base_url: impl Into<String>) -> Self {
        Self {
            link_repository,
            base_url: base_url.into(),
        }
    }

    /// Allocates a unique short code for `target_url` and stores the link.
    ///
    /// Up to [`MAX_ALLOCATION_ATTEMPTS`] candidates are drawn. For each, an existing
    /// link with that code skips straight to the next candidate; otherwise an atomic
    /// insert is attempted, and a rejected insert (a concurrent allocation won the
    /// code) also moves on to the next candidate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an http(s) URL.
    /// Returns [`AppError::CodeSpaceExhausted`] when every attempt collided.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn allocate(&self, target_url: &str, owner_id: OwnerId) -> Result<ShortLink, AppError> {
        let target_url = validate_target_url(target_url)?;

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let code = generate_code();

            if self.link_repository.exists_by_code(&code).await? {
                tracing::debug!(attempt, code = %code, "Short code already taken");
                metrics::counter!("short_code_collisions_total").increment(1);
                continue;
            }

            let new_link = NewLink {
                code: code.clone(),
                target_url: target_url.clone(),
                owner_id,
            };

            match self.link_repository.try_create(new_link).await? {
                Some(link) => {
                    tracing::info!(code = %link.code, owner_id = %owner_id, attempt, "Short link created");
                    metrics::counter!("short_codes_allocated_total").increment(1);
                    return Ok(link);
                }
                None => {
                    tracing::debug!(attempt, code = %code, "Insert rejected by code uniqueness constraint");
                    metrics::counter!("short_code_collisions_total").increment(1);
                }
            }
        }

        tracing::warn!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            owner_id = %owner_id,
            "Failed to allocate a unique short code"
        );

        Err(AppError::code_space_exhausted(
            "Unable to generate unique short code. Please try again.",
            json!({ "attempts": MAX_ALLOCATION_ATTEMPTS }),
        ))
    }

    /// Lists an owner's links with pagination.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(
        &self,
        owner_id: OwnerId,
        offset: i64,
        limit: i64,
    ) -> Result<LinkPage, AppError> {
        let links = self
            .link_repository
            .list_by_owner(owner_id, offset, limit)
            .await?;
        let total = self.link_repository.count_by_owner(owner_id).await?;

        Ok(LinkPage { links, total })
    }

    /// Retrieves one of the owner's links.
    ///
    /// Links of other owners are reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn get_link(&self, code: &str, owner_id: OwnerId) -> Result<ShortLink, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .filter(|link| link.is_owned_by(owner_id))
            .ok_or_else(|| not_found(code))
    }

    /// Replaces the destination of one of the owner's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the new URL is not an http(s) URL.
    /// Returns [`AppError::NotFound`] if the owner has no link with this code.
    pub async fn update_target(
        &self,
        code: &str,
        owner_id: OwnerId,
        target_url: &str,
    ) -> Result<ShortLink, AppError> {
        let target_url = validate_target_url(target_url)?;

        let link = self
            .link_repository
            .update_target(code, owner_id, &target_url)
            .await?
            .ok_or_else(|| not_found(code))?;

        tracing::info!(code, owner_id = %owner_id, "Short link target updated");
        Ok(link)
    }

    /// Deletes one of the owner's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner has no link with this code.
    pub async fn delete_link(&self, code: &str, owner_id: OwnerId) -> Result<(), AppError> {
        if !self.link_repository.delete(code, owner_id).await? {
            return Err(not_found(code));
        }

        tracing::info!(code, owner_id = %owner_id, "Short link deleted");
        Ok(())
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}

/// Checks that `input` is an absolute http(s) URL of acceptable length.
///
/// Returns the trimmed URL as written. It is deliberately not normalized: dot
/// segments and doubled slashes must survive for the redirect-time safety checks.
fn validate_target_url(input: &str) -> Result<String, AppError> {
    let input = input.trim();

    if input.is_empty() || input.len() > MAX_TARGET_URL_LENGTH {
        return Err(AppError::bad_request(
            "URL must be between 1 and 2048 characters",
            json!({ "provided_length": input.len() }),
        ));
    }

    // Url::parse drops tabs and newlines, but the stored value must fit a Location header.
    if input.chars().any(|c| c.is_ascii_control()) {
        return Err(AppError::bad_request(
            "URL must not contain control characters",
            json!({}),
        ));
    }

    let url = Url::parse(input).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(AppError::bad_request(
            "Enter a valid URL address with http or https",
            json!({ "scheme": url.scheme() }),
        ));
    }

    Ok(input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::is_well_formed_code;
    use chrono::Utc;
    use mockall::Sequence;

    const OWNER: OwnerId = OwnerId(1);

    fn link_from(new_link: &NewLink) -> ShortLink {
        ShortLink::new(
            10,
            new_link.code.clone(),
            new_link.target_url.clone(),
            new_link.owner_id,
            0,
            Utc::now(),
            Utc::now(),
        )
    }

    fn test_link(code: &str, owner: OwnerId) -> ShortLink {
        ShortLink::new(
            5,
            code.to_string(),
            "https://example.com".to_string(),
            owner,
            2,
            Utc::now(),
            Utc::now(),
        )
    }

    fn service(repo: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(Arc::new(repo), "https://sho.rt")
    }

    #[tokio::test]
    async fn test_allocate_success_first_attempt() {
        let mut repo = MockLinkRepository::new();

        repo.expect_exists_by_code()
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_try_create()
            .withf(|new_link| {
                is_well_formed_code(&new_link.code)
                    && new_link.target_url == "https://example.com/page"
                    && new_link.owner_id == OWNER
            })
            .times(1)
            .returning(|new_link| Ok(Some(link_from(&new_link))));

        let link = service(repo)
            .allocate("https://example.com/page", OWNER)
            .await
            .unwrap();

        assert_eq!(link.code.len(), 6);
        assert!(link.code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(link.owner_id, OWNER);
        assert_eq!(link.click_count, 0);
    }

    #[tokio::test]
    async fn test_allocate_retries_after_existing_code() {
        let mut repo = MockLinkRepository::new();
        let mut seq = Sequence::new();

        repo.expect_exists_by_code()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        repo.expect_exists_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));
        repo.expect_try_create()
            .times(1)
            .returning(|new_link| Ok(Some(link_from(&new_link))));

        let result = service(repo).allocate("https://example.com", OWNER).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_allocate_retries_after_insert_conflict() {
        let mut repo = MockLinkRepository::new();
        let mut seq = Sequence::new();

        repo.expect_exists_by_code()
            .times(2)
            .returning(|_| Ok(false));
        // a concurrent allocation wins the first candidate between check and insert
        repo.expect_try_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        repo.expect_try_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Ok(Some(link_from(&new_link))));

        let result = service(repo).allocate("https://example.com", OWNER).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_allocate_exhausted_after_five_attempts() {
        let mut repo = MockLinkRepository::new();

        repo.expect_exists_by_code()
            .times(MAX_ALLOCATION_ATTEMPTS)
            .returning(|_| Ok(false));
        repo.expect_try_create()
            .times(MAX_ALLOCATION_ATTEMPTS)
            .returning(|_| Ok(None));

        let result = service(repo).allocate("https://example.com", OWNER).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::CodeSpaceExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn test_allocate_exhausted_when_every_candidate_exists() {
        let mut repo = MockLinkRepository::new();

        repo.expect_exists_by_code()
            .times(MAX_ALLOCATION_ATTEMPTS)
            .returning(|_| Ok(true));
        repo.expect_try_create().times(0);

        let result = service(repo).allocate("https://example.com", OWNER).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::CodeSpaceExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn test_allocate_propagates_storage_errors() {
        let mut repo = MockLinkRepository::new();

        repo.expect_exists_by_code()
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_try_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(repo).allocate("https://example.com", OWNER).await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_allocate_rejects_invalid_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists_by_code().times(0);
        repo.expect_try_create().times(0);
        let service = service(repo);

        for input in ["not-a-url", "ftp://example.com", "", "mailto:a@b.c"] {
            let result = service.allocate(input, OWNER).await;
            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_allocate_rejects_control_characters() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists_by_code().times(0);
        repo.expect_try_create().times(0);
        let service = service(repo);

        for input in ["https://example.com/a\nb", "https://example.com/a\tb", "https://exa\rmple.com/"] {
            let result = service.allocate(input, OWNER).await;
            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_allocate_keeps_url_as_written() {
        let mut repo = MockLinkRepository::new();

        repo.expect_exists_by_code().returning(|_| Ok(false));
        repo.expect_try_create()
            .withf(|new_link| new_link.target_url == "https://example.com/a/../b")
            .times(1)
            .returning(|new_link| Ok(Some(link_from(&new_link))));

        let result = service(repo)
            .allocate("  https://example.com/a/../b ", OWNER)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_link_hides_other_owners_links() {
        let mut repo = MockLinkRepository::new();

        repo.expect_find_by_code()
            .returning(|code| Ok(Some(test_link(code, OwnerId(2)))));

        let result = service(repo).get_link("aB3xY9", OWNER).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_target_not_found() {
        let mut repo = MockLinkRepository::new();

        repo.expect_update_target()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let result = service(repo)
            .update_target("aB3xY9", OWNER, "https://example.org")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_target_validates_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_update_target().times(0);

        let result = service(repo)
            .update_target("aB3xY9", OWNER, "javascript:alert(1)")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_link() {
        let mut repo = MockLinkRepository::new();
        let mut seq = Sequence::new();

        repo.expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(true));
        repo.expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(false));

        let service = service(repo);

        assert!(service.delete_link("aB3xY9", OWNER).await.is_ok());
        assert!(matches!(
            service.delete_link("aB3xY9", OWNER).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_links() {
        let mut repo = MockLinkRepository::new();

        repo.expect_list_by_owner()
            .withf(|owner, offset, limit| *owner == OWNER && *offset == 0 && *limit == 25)
            .times(1)
            .returning(|owner, _, _| Ok(vec![test_link("aaaaaa", owner), test_link("bbbbbb", owner)]));
        repo.expect_count_by_owner()
            .times(1)
            .returning(|_| Ok(2));

        let page = service(repo).list_links(OWNER, 0, 25).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.links.len(), 2);
    }

    #[test]
    fn test_short_url() {
        let service = LinkService::new(Arc::new(MockLinkRepository::new()), "https://sho.rt/");
        assert_eq!(service.short_url("aB3xY9"), "https://sho.rt/aB3xY9");
    }
}
