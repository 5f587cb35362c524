//! Domain layer containing business entities and rules.
//!
//! Independent of HTTP and database concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`safety`] - Trusted-domain registry and redirect-safety classifier
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives `GET /{code}`
//! 2. [`repositories::LinkRepository::lookup_and_touch`] finds the link and bumps its click count
//! 3. [`safety::classify`] inspects the destination against the trusted-domain snapshot
//! 4. [`crate::application::services::RedirectService`] picks redirect, interstitial or rejection

pub mod entities;
pub mod repositories;
pub mod safety;
