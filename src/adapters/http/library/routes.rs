//! Axum router configuration for library endpoints.

use axum::{routing::get, Router};

use super::handlers::{download, list_entitlements};
use crate::adapters::http::AppState;

/// Library routes, mounted at `/api`. All require authentication.
///
/// - `GET /entitlements`
/// - `GET /docs/:slug/download`
pub fn library_routes() -> Router<AppState> {
    Router::new()
        .route("/entitlements", get(list_entitlements))
        .route("/docs/:slug/download", get(download))
}
