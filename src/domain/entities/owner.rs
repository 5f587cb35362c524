//! Identity of the caller on whose behalf links are created and managed.

use serde::Serialize;
use std::fmt;

/// Opaque identifier of a link owner.
///
/// Backed by the id of the API token the request authenticated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authenticated caller, inserted into request extensions by the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub owner_id: OwnerId,
    pub is_admin: bool,
}

impl Principal {
    pub fn new(owner_id: OwnerId, is_admin: bool) -> Self {
        Self { owner_id, is_admin }
    }
}
