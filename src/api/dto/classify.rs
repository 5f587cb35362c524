//! DTOs for the classification preview endpoint.

use serde::Deserialize;

/// Query for `GET /api/classify?url=...`.
#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub url: String,
}
