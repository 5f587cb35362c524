//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    add_trusted_domain_handler, classify_handler, create_link_handler, delete_link_handler,
    get_link_handler, list_links_handler, list_trusted_domains_handler,
    remove_trusted_domain_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /links`                     - Caller's links (paginated)
/// - `POST   /links`                     - Allocate a short code for a URL
/// - `GET    /links/{code}`              - One of the caller's links
/// - `PUT    /links/{code}`              - Replace a link's destination
/// - `DELETE /links/{code}`              - Delete a link
/// - `GET    /classify?url=`             - Preview the safety verdict for a URL
/// - `GET    /trusted-domains`           - List trusted hostnames
/// - `POST   /trusted-domains`           - Trust a hostname (admin)
/// - `DELETE /trusted-domains/{domain}`  - Stop trusting a hostname (admin)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{code}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/classify", get(classify_handler))
        .route(
            "/trusted-domains",
            get(list_trusted_domains_handler).post(add_trusted_domain_handler),
        )
        .route(
            "/trusted-domains/{domain}",
            delete(remove_trusted_domain_handler),
        )
}
