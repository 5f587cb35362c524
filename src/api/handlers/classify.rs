//! Handler for the classification preview endpoint.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::classify::ClassifyQuery;
use crate::domain::safety::ClassificationResult;
use crate::state::AppState;

/// Classifies a URL without storing it.
///
/// # Endpoint
///
/// `GET /api/classify?url=...`
///
/// # Response
///
/// ```json
/// {
///   "isValid": true,
///   "isTrusted": false,
///   "warnings": ["Suspicious top-level domain: .tk"],
///   "riskLevel": "medium"
/// }
/// ```
pub async fn classify_handler(
    State(state): State<AppState>,
    Query(query): Query<ClassifyQuery>,
) -> Json<ClassificationResult> {
    Json(state.trusted_domains.classify(&query.url))
}
