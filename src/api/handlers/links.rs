//! Handlers for link management endpoints (create, list, update, delete).
//!
//! Every handler acts on behalf of the [`Principal`] inserted by the auth
//! middleware and only ever sees that owner's links.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{LinkListResponse, LinkRequest, LinkResponse, PaginationMeta};
use crate::api::dto::pagination::PaginationParams;
use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link with a freshly allocated code.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/page" }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "code": "aB3xY9",
///   "short_url": "https://sho.rt/aB3xY9",
///   "target_url": "https://example.com/some/page",
///   "click_count": 0,
///   "created_at": "2026-01-01T00:00:00Z",
///   "updated_at": "2026-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is invalid.
/// Returns 503 Service Unavailable if no free code was found.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<LinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .allocate(&payload.url, principal.owner_id)
        .await?;

    let short_url = state.link_service.short_url(&link.code);

    Ok((StatusCode::CREATED, Json(LinkResponse::new(link, short_url))))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?page=1&page_size=25`
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are out of range.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|msg| AppError::bad_request(msg, json!({})))?;

    let page = state
        .link_service
        .list_links(principal.owner_id, offset, limit)
        .await?;

    let items = page
        .links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            LinkResponse::new(link, short_url)
        })
        .collect();

    Ok(Json(LinkListResponse {
        pagination: PaginationMeta::new(params.page(), params.page_size(), page.total),
        items,
    }))
}

/// Returns one of the caller's links.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the caller owns no link with this code.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .link_service
        .get_link(&code, principal.owner_id)
        .await?;

    let short_url = state.link_service.short_url(&link.code);

    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Replaces the destination of one of the caller's links.
///
/// # Endpoint
///
/// `PUT /api/links/{code}`
///
/// # Request Body
///
/// ```json
/// { "url": "https://new-destination.com" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the caller owns no link with this code.
/// Returns 400 Bad Request if validation fails.
pub async fn update_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<LinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update_target(&code, principal.owner_id, &payload.url)
        .await?;

    let short_url = state.link_service.short_url(&link.code);

    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Permanently deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// Subsequent redirects for this code return 404.
///
/// # Errors
///
/// Returns 404 Not Found if the caller owns no link with this code.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<StatusCode, AppError> {
    state
        .link_service
        .delete_link(&code, principal.owner_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
