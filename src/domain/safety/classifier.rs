//! Redirect-safety classification of destination URLs.
//!
//! [`classify`] is a pure function of the URL and a trusted-domain snapshot. It runs a
//! fixed sequence of checks:
//!
//! 1. Parse the URL (failure: invalid, high risk, stop)
//! 2. Require `http` or `https` (failure: invalid, high risk, stop)
//! 3. Trusted host (trusted, no warnings, stop)
//! 4. Suspicious top-level domain
//! 5. Phishing keywords in host + path
//! 6. IPv4 literal host
//! 7. Path traversal patterns (`..`, `//`)
//! 8. Overlong URL
//!
//! Checks 4-8 always all run. Risk only ever escalates within one call.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use url::{Host, Url};

/// TLDs frequently used for throwaway or malicious hosting.
pub const SUSPICIOUS_TLDS: &[&str] = &[
    "tk", "ml", "ga", "cf", "click", "download", "zip", "review", "date", "loan",
];

/// Substrings commonly seen in phishing hosts and paths.
pub const PHISHING_KEYWORDS: &[&str] = &[
    "login",
    "signin",
    "verify",
    "account",
    "secure",
    "update",
    "suspended",
    "bank",
    "paypal",
    "amazon",
    "google",
    "microsoft",
    "apple",
    "facebook",
];

/// URLs longer than this many characters are flagged.
pub const MAX_URL_LENGTH: usize = 2000;

/// Loopback literal exempt from the direct-IP check.
const LOOPBACK_V4: &str = "127.0.0.1";

pub const WARNING_INVALID_FORMAT: &str = "Invalid URL format";
pub const WARNING_INVALID_PROTOCOL: &str = "Invalid protocol. Only HTTP and HTTPS are allowed.";
pub const WARNING_DIRECT_IP: &str = "Direct IP address access detected";
pub const WARNING_PATH_TRAVERSAL: &str = "Suspicious path traversal patterns detected";
pub const WARNING_LONG_URL: &str = "Unusually long URL detected";

/// Ordinal danger of following a redirect. `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for one destination URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub is_valid: bool,
    pub is_trusted: bool,
    pub warnings: Vec<String>,
    pub risk_level: RiskLevel,
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self {
            is_valid: true,
            is_trusted: false,
            warnings: Vec::new(),
            risk_level: RiskLevel::Low,
        }
    }
}

impl ClassificationResult {
    /// Raises the risk level to at least `level`. Never lowers it.
    fn escalate(&mut self, level: RiskLevel) {
        self.risk_level = self.risk_level.max(level);
    }

    fn flag(&mut self, warning: impl Into<String>, level: RiskLevel) {
        self.warnings.push(warning.into());
        self.escalate(level);
    }

    fn rejected(warning: &str) -> Self {
        Self {
            is_valid: false,
            is_trusted: false,
            warnings: vec![warning.to_string()],
            risk_level: RiskLevel::High,
        }
    }

    /// True when the caller should be shown an interstitial instead of redirected.
    pub fn requires_warning(&self) -> bool {
        !self.is_trusted && (!self.warnings.is_empty() || self.risk_level >= RiskLevel::Medium)
    }
}

/// Classifies `input` against the trusted host set `trusted` (lowercase hostnames).
pub fn classify(input: &str, trusted: &HashSet<String>) -> ClassificationResult {
    let Ok(url) = Url::parse(input) else {
        return ClassificationResult::rejected(WARNING_INVALID_FORMAT);
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return ClassificationResult::rejected(WARNING_INVALID_PROTOCOL);
    }

    let host = url.host_str().unwrap_or_default().to_lowercase();

    let mut result = ClassificationResult::default();

    if trusted.contains(&host) {
        result.is_trusted = true;
        return result;
    }

    if let Some(tld) = top_level_domain(&host)
        && SUSPICIOUS_TLDS.contains(&tld)
    {
        result.flag(format!("Suspicious top-level domain: .{tld}"), RiskLevel::Medium);
    }

    let haystack = format!("{}{}", host, url.path()).to_lowercase();
    let found: Vec<&str> = PHISHING_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| haystack.contains(keyword))
        .collect();
    if !found.is_empty() {
        result.flag(
            format!("Potential phishing indicators found: {}", found.join(", ")),
            RiskLevel::Medium,
        );
    }

    if matches!(url.host(), Some(Host::Ipv4(_))) && host != LOOPBACK_V4 {
        result.flag(WARNING_DIRECT_IP, RiskLevel::Medium);
    }

    if has_traversal_pattern(raw_path(input)) || has_traversal_pattern(url.path()) {
        result.flag(WARNING_PATH_TRAVERSAL, RiskLevel::High);
    }

    if input.chars().count() > MAX_URL_LENGTH {
        result.flag(WARNING_LONG_URL, RiskLevel::Medium);
    }

    result
}

/// Text after the final dot of `host`, ignoring a trailing root dot.
fn top_level_domain(host: &str) -> Option<&str> {
    host.trim_end_matches('.')
        .rsplit('.')
        .next()
        .filter(|tld| !tld.is_empty())
}

fn has_traversal_pattern(path: &str) -> bool {
    path.contains("..") || path.contains("//")
}

/// Path component exactly as written in `input`.
///
/// The `url` crate resolves dot segments while parsing, so `/../../etc` would
/// otherwise be seen as `/etc`.
fn raw_path(input: &str) -> &str {
    let Some(scheme_end) = input.find("://") else {
        return "";
    };
    let rest = &input[scheme_end + 3..];

    let Some(path_start) = rest.find(['/', '\\', '?', '#']) else {
        return "";
    };
    let from_path = &rest[path_start..];
    if from_path.starts_with(['?', '#']) {
        return "";
    }

    let path_end = from_path.find(['?', '#']).unwrap_or(from_path.len());
    &from_path[..path_end]
}
