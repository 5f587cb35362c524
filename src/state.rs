//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, RedirectService};
use crate::domain::safety::TrustedDomainRegistry;
use crate::infrastructure::persistence::{PgLinkRepository, PgTokenRepository};

/// Cloneable handle to services and shared resources.
///
/// The trusted-domain registry is owned here and shared with the redirect service,
/// so administrative changes are visible to the next classification.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub redirect_service: Arc<RedirectService<PgLinkRepository>>,
    pub auth_service: Arc<AuthService<PgTokenRepository>>,
    pub trusted_domains: Arc<TrustedDomainRegistry>,
}

impl AppState {
    /// Wires repositories and services on top of a connection pool.
    ///
    /// # Arguments
    ///
    /// - `pool` - PostgreSQL connection pool
    /// - `trusted_domains` - registry shared by classification and the admin API
    /// - `public_base_url` - origin used to build short URLs
    /// - `signing_secret` - HMAC key for API token hashes
    pub fn new(
        pool: Arc<PgPool>,
        trusted_domains: Arc<TrustedDomainRegistry>,
        public_base_url: impl Into<String>,
        signing_secret: String,
    ) -> Self {
        let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
        let token_repository = Arc::new(PgTokenRepository::new(pool.clone()));

        Self {
            link_service: Arc::new(LinkService::new(
                link_repository.clone(),
                public_base_url,
            )),
            redirect_service: Arc::new(RedirectService::new(
                link_repository,
                trusted_domains.clone(),
            )),
            auth_service: Arc::new(AuthService::new(token_repository, signing_secret)),
            trusted_domains,
            pool,
        }
    }
}
