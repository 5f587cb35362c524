//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_well_formed_code;
use crate::web::present;

/// Resolves a short code to a redirect, an interstitial or an error.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject codes that are not 6 alphanumeric characters (no DB access)
/// 2. Look up the link and count the click in one statement
/// 3. Classify the destination against the trusted-domain registry
/// 4. Respond according to the verdict
///
/// # Responses
///
/// - **307 Temporary Redirect**: trusted host, or untrusted with low risk and no warnings
/// - **200 OK** (HTML): warning interstitial with "proceed" and "go back" actions
/// - **400 Bad Request**: stored destination is unparsable or not http(s)
/// - **404 Not Found**: unknown or malformed code
///
/// The click is counted for every known code, including interstitial and 400
/// outcomes.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if !is_well_formed_code(&code) {
        metrics::counter!("redirects_total", "outcome" => "not_found").increment(1);
        return Err(not_found(&code));
    }

    let resolution = state.redirect_service.resolve(&code).await?;

    metrics::counter!("redirects_total", "outcome" => resolution.outcome()).increment(1);

    match resolution {
        Resolution::NotFound => Err(not_found(&code)),
        Resolution::InvalidTarget { verdict, .. } => {
            tracing::info!(code = %code, warnings = ?verdict.warnings, "Refused redirect to invalid target");
            Err(AppError::invalid_redirect_target(
                "Short link points to an invalid destination",
                json!({ "code": code, "warnings": verdict.warnings }),
            ))
        }
        Resolution::TrustedRedirect { target_url } | Resolution::LowRiskRedirect { target_url } => {
            Ok(Redirect::temporary(&target_url).into_response())
        }
        Resolution::WarnInterstitial {
            target_url,
            verdict,
        } => {
            tracing::info!(
                code = %code,
                risk_level = %verdict.risk_level,
                warnings = verdict.warnings.len(),
                "Showing redirect warning"
            );
            Ok(present(&target_url, &verdict).into_response())
        }
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
