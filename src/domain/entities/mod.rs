//! Core domain entities.
//!
//! - [`ShortLink`] - a short code mapped to a destination URL, owned by one account
//! - [`NewLink`] - input for inserting a link under an already chosen code
//! - [`OwnerId`] / [`Principal`] - the authenticated caller
//!
//! Entities are plain data without persistence concerns.

pub mod link;
pub mod owner;

pub use link::{NewLink, ShortLink};
pub use owner::{OwnerId, Principal};
