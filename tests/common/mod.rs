#![allow(dead_code)]

use axum::{Router, middleware};
use shotty::api;
use shotty::api::middleware::auth;
use shotty::domain::entities::OwnerId;
use shotty::domain::safety::TrustedDomainRegistry;
use shotty::state::AppState;
use shotty::utils::token::hash_token;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";
pub const TEST_BASE_URL: &str = "https://sho.rt";

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_registry(pool, Arc::new(TrustedDomainRegistry::new()))
}

pub fn create_test_state_with_registry(
    pool: PgPool,
    trusted_domains: Arc<TrustedDomainRegistry>,
) -> AppState {
    AppState::new(
        Arc::new(pool),
        trusted_domains,
        TEST_BASE_URL,
        TEST_SIGNING_SECRET.to_string(),
    )
}

/// `/api` routes behind the real bearer auth middleware, without rate limiting.
pub fn api_app(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new().nest("/api", api_router).with_state(state)
}

/// Inserts an API token and returns its owner id.
pub async fn create_test_token(pool: &PgPool, name: &str, raw: &str, is_admin: bool) -> OwnerId {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO api_tokens (name, token_hash, is_admin) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(hash_token(TEST_SIGNING_SECRET, raw))
    .bind(is_admin)
    .fetch_one(pool)
    .await
    .unwrap();

    OwnerId(id)
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str, owner: OwnerId) {
    sqlx::query("INSERT INTO links (code, target_url, owner_id) VALUES ($1, $2, $3)")
        .bind(code)
        .bind(url)
        .bind(owner.0)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn click_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT click_count FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}
