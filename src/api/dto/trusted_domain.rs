//! DTOs for trusted-domain management.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Bare hostname: dot-separated labels of letters, digits and inner hyphens.
static HOSTNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)*$")
        .unwrap()
});

/// Request body for `POST /api/trusted-domains`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddTrustedDomainRequest {
    /// Hostname without scheme, port or path, e.g. `docs.rs`.
    #[validate(length(min = 1, max = 253, message = "Domain must be between 1 and 253 characters"))]
    #[validate(regex(path = *HOSTNAME_REGEX, message = "Domain must be a bare hostname"))]
    pub domain: String,
}

/// Response containing the trusted hostnames, sorted.
#[derive(Debug, Serialize)]
pub struct TrustedDomainListResponse {
    pub items: Vec<String>,
}

/// Response for a newly trusted hostname.
#[derive(Debug, Serialize)]
pub struct TrustedDomainItem {
    pub domain: String,
}
