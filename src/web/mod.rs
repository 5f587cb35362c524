//! Server-rendered HTML pages.
//!
//! Uses Askama templates from `templates/` with HTML auto-escaping.
//!
//! # Modules
//!
//! - [`warning`] - Interstitial shown before a flagged redirect

pub mod warning;

pub use warning::{WarningPage, present};
