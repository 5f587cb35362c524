//! Resolution of short codes into redirect decisions.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::domain::safety::{ClassificationResult, TrustedDomainRegistry};
use crate::error::AppError;

/// Terminal outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No link has this code. Nothing was counted.
    NotFound,
    /// The stored target failed parsing or uses a non-http(s) scheme.
    InvalidTarget {
        target_url: String,
        verdict: ClassificationResult,
    },
    /// Target host is in the trusted-domain registry.
    TrustedRedirect { target_url: String },
    /// Untrusted target with no warnings and low risk.
    LowRiskRedirect { target_url: String },
    /// Target needs an explicit confirmation from the visitor.
    WarnInterstitial {
        target_url: String,
        verdict: ClassificationResult,
    },
}

impl Resolution {
    /// Label used for logs and the `redirects_total` metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::NotFound => "not_found",
            Resolution::InvalidTarget { .. } => "invalid_target",
            Resolution::TrustedRedirect { .. } => "trusted",
            Resolution::LowRiskRedirect { .. } => "low_risk",
            Resolution::WarnInterstitial { .. } => "interstitial",
        }
    }

    /// Maps a classifier verdict for `target_url` to its terminal state.
    fn from_verdict(target_url: String, verdict: ClassificationResult) -> Self {
        if !verdict.is_valid {
            Resolution::InvalidTarget {
                target_url,
                verdict,
            }
        } else if verdict.is_trusted {
            Resolution::TrustedRedirect { target_url }
        } else if verdict.requires_warning() {
            Resolution::WarnInterstitial {
                target_url,
                verdict,
            }
        } else {
            Resolution::LowRiskRedirect { target_url }
        }
    }
}

/// Service resolving short codes for the public redirect endpoint.
///
/// The click counter is bumped by the lookup itself, before classification. A visit
/// that ends on the warning interstitial or on an invalid target is still counted.
pub struct RedirectService<L: LinkRepository> {
    link_repository: Arc<L>,
    trusted_domains: Arc<TrustedDomainRegistry>,
}

impl<L: LinkRepository> RedirectService<L> {
    pub fn new(link_repository: Arc<L>, trusted_domains: Arc<TrustedDomainRegistry>) -> Self {
        Self {
            link_repository,
            trusted_domains,
        }
    }

    /// Looks up `code`, counts the click and classifies the stored target.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Unknown codes are
    /// reported as [`Resolution::NotFound`], not as an error.
    pub async fn resolve(&self, code: &str) -> Result<Resolution, AppError> {
        let Some(link) = self.link_repository.lookup_and_touch(code).await? else {
            tracing::debug!(code, "Short code not found");
            return Ok(Resolution::NotFound);
        };

        let verdict = self.trusted_domains.classify(&link.target_url);
        let resolution = Resolution::from_verdict(link.target_url, verdict);

        tracing::debug!(
            code,
            clicks = link.click_count,
            outcome = resolution.outcome(),
            "Short code resolved"
        );

        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{OwnerId, ShortLink};
    use crate::domain::repositories::MockLinkRepository;
    use crate::domain::safety::RiskLevel;
    use chrono::Utc;
    use serde_json::json;

    fn link_to(target: &str, clicks: i64) -> ShortLink {
        ShortLink::new(
            1,
            "aB3xY9".to_string(),
            target.to_string(),
            OwnerId(1),
            clicks,
            Utc::now(),
            Utc::now(),
        )
    }

    fn service_resolving_to(target: &'static str) -> RedirectService<MockLinkRepository> {
        let mut repo = MockLinkRepository::new();
        repo.expect_lookup_and_touch()
            .times(1)
            .returning(move |_| Ok(Some(link_to(target, 1))));

        RedirectService::new(Arc::new(repo), Arc::new(TrustedDomainRegistry::new()))
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_lookup_and_touch()
            .withf(|code| code == "zzzzzz")
            .times(1)
            .returning(|_| Ok(None));

        let service = RedirectService::new(Arc::new(repo), Arc::new(TrustedDomainRegistry::new()));

        assert_eq!(service.resolve("zzzzzz").await.unwrap(), Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_trusted_redirect() {
        let service = service_resolving_to("http://localhost/anything");

        assert_eq!(
            service.resolve("aB3xY9").await.unwrap(),
            Resolution::TrustedRedirect {
                target_url: "http://localhost/anything".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_low_risk_redirect() {
        let service = service_resolving_to("https://example.com/docs");

        assert_eq!(
            service.resolve("aB3xY9").await.unwrap(),
            Resolution::LowRiskRedirect {
                target_url: "https://example.com/docs".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_invalid_target() {
        let service = service_resolving_to("ftp://example.com/file");

        match service.resolve("aB3xY9").await.unwrap() {
            Resolution::InvalidTarget { verdict, .. } => {
                assert!(!verdict.is_valid);
                assert_eq!(verdict.risk_level, RiskLevel::High);
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_suspicious_target_shows_interstitial() {
        let service = service_resolving_to("https://example.tk/login");

        match service.resolve("aB3xY9").await.unwrap() {
            Resolution::WarnInterstitial {
                target_url,
                verdict,
            } => {
                assert_eq!(target_url, "https://example.tk/login");
                assert_eq!(verdict.risk_level, RiskLevel::Medium);
                assert_eq!(verdict.warnings.len(), 2);
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_counts_click_even_when_interstitial_shown() {
        // Known quirk: the click is recorded by lookup_and_touch before classification,
        // so a visitor who backs out of the interstitial is still counted.
        let mut repo = MockLinkRepository::new();
        repo.expect_lookup_and_touch()
            .times(1)
            .returning(|_| Ok(Some(link_to("https://1.2.3.4/page", 7))));
        repo.expect_find_by_code().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(TrustedDomainRegistry::new()));

        assert_eq!(
            service.resolve("aB3xY9").await.unwrap().outcome(),
            "interstitial"
        );
    }

    #[tokio::test]
    async fn test_resolve_uses_current_registry() {
        let registry = Arc::new(TrustedDomainRegistry::new());
        let mut repo = MockLinkRepository::new();
        repo.expect_lookup_and_touch()
            .times(2)
            .returning(|_| Ok(Some(link_to("https://account.example.tk/", 1))));

        let service = RedirectService::new(Arc::new(repo), registry.clone());

        assert_eq!(service.resolve("aB3xY9").await.unwrap().outcome(), "interstitial");

        registry.add("account.example.tk");

        assert_eq!(service.resolve("aB3xY9").await.unwrap().outcome(), "trusted");
    }

    #[tokio::test]
    async fn test_resolve_propagates_storage_errors() {
        let mut repo = MockLinkRepository::new();
        repo.expect_lookup_and_touch()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = RedirectService::new(Arc::new(repo), Arc::new(TrustedDomainRegistry::new()));

        assert!(matches!(
            service.resolve("aB3xY9").await.unwrap_err(),
            AppError::Internal { .. }
        ));
    }

    #[test]
    fn test_from_verdict_warnings_alone_require_interstitial() {
        let verdict = ClassificationResult {
            warnings: vec!["something odd".to_string()],
            ..Default::default()
        };

        assert_eq!(
            Resolution::from_verdict("https://example.com".to_string(), verdict).outcome(),
            "interstitial"
        );
    }
}
