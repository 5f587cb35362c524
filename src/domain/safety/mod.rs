//! Redirect safety: the trusted-domain registry and the classifier that uses it.

pub mod classifier;
pub mod registry;

pub use classifier::{ClassificationResult, RiskLevel, classify};
pub use registry::TrustedDomainRegistry;
