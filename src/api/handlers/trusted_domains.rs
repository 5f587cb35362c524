//! Handlers for trusted-domain management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::trusted_domain::{
    AddTrustedDomainRequest, TrustedDomainItem, TrustedDomainListResponse,
};
use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

fn require_admin(principal: &Principal) -> Result<(), AppError> {
    if principal.is_admin {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Admin token required",
            json!({ "owner_id": principal.owner_id }),
        ))
    }
}

/// Lists trusted hostnames in alphabetical order.
///
/// # Endpoint
///
/// `GET /api/trusted-domains`
pub async fn list_trusted_domains_handler(
    State(state): State<AppState>,
) -> Json<TrustedDomainListResponse> {
    Json(TrustedDomainListResponse {
        items: state.trusted_domains.list(),
    })
}

/// Adds a hostname to the trusted set.
///
/// # Endpoint
///
/// `POST /api/trusted-domains`
///
/// # Errors
///
/// Returns 403 if the token is not an admin token.
/// Returns 400 if the value is not a bare hostname.
/// Returns 409 if the hostname is already trusted.
pub async fn add_trusted_domain_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<AddTrustedDomainRequest>,
) -> Result<(StatusCode, Json<TrustedDomainItem>), AppError> {
    require_admin(&principal)?;
    payload.validate()?;

    let domain = payload.domain.to_lowercase();

    if !state.trusted_domains.add(&domain) {
        return Err(AppError::conflict(
            "Domain is already trusted",
            json!({ "domain": domain }),
        ));
    }

    tracing::info!(domain = %domain, owner_id = %principal.owner_id, "Trusted domain added");

    Ok((StatusCode::CREATED, Json(TrustedDomainItem { domain })))
}

/// Removes a hostname from the trusted set.
///
/// # Endpoint
///
/// `DELETE /api/trusted-domains/{domain}`
///
/// # Errors
///
/// Returns 403 if the token is not an admin token.
/// Returns 404 if the hostname is not trusted.
pub async fn remove_trusted_domain_handler(
    Path(domain): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<StatusCode, AppError> {
    require_admin(&principal)?;

    if !state.trusted_domains.remove(&domain) {
        return Err(AppError::not_found(
            "Domain is not trusted",
            json!({ "domain": domain }),
        ));
    }

    tracing::info!(domain = %domain, owner_id = %principal.owner_id, "Trusted domain removed");

    Ok(StatusCode::NO_CONTENT)
}
