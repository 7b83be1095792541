//! Health and identity endpoints.
//!
//! - `GET /api/health` - Liveness, no authentication
//! - `GET /api/whoami` - Echo the verified identity

use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct WhoAmIResponse {
    pub sub: String,
    pub email: String,
}

/// GET /api/health
pub async fn health() -> &'static str {
    "ok"
}

/// GET /api/whoami
pub async fn whoami(RequireAuth(identity): RequireAuth) -> impl IntoResponse {
    Json(WhoAmIResponse {
        sub: identity.subject_id.to_string(),
        email: identity.email,
    })
}

/// Routes that never require authentication.
pub fn public_system_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Routes that require authentication.
pub fn protected_system_routes() -> Router<AppState> {
    Router::new().route("/whoami", get(whoami))
}
