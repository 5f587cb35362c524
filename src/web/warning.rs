//! Interstitial page shown before redirecting to a risky destination.

use askama::Template;
use askama_web::WebTemplate;

use crate::domain::safety::{ClassificationResult, RiskLevel};

/// Rendered confirmation page for a flagged redirect.
///
/// Renders `templates/warning.html` with:
/// - The destination URL
/// - Warnings in the order the classifier raised them
/// - A badge for the risk level
/// - A "proceed" link to the destination and a "go back" button that stays put
///
/// All values are HTML-escaped by the template engine.
#[derive(Debug, Template, WebTemplate)]
#[template(path = "warning.html")]
pub struct WarningPage {
    pub destination: String,
    pub warnings: Vec<String>,
    pub risk_level: RiskLevel,
}

impl WarningPage {
    /// Title shown in the badge.
    pub fn risk_label(&self) -> &'static str {
        match self.risk_level {
            RiskLevel::Low => "Low risk",
            RiskLevel::Medium => "Medium risk",
            RiskLevel::High => "High risk",
        }
    }
}

/// Builds the interstitial for `target_url` from its classifier verdict.
///
/// Pure: touches neither the link nor the trusted-domain registry.
pub fn present(target_url: &str, verdict: &ClassificationResult) -> WarningPage {
    WarningPage {
        destination: target_url.to_string(),
        warnings: verdict.warnings.clone(),
        risk_level: verdict.risk_level,
    }
}
