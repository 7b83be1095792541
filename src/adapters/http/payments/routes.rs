//! Axum router configuration for payment endpoints.

use axum::{routing::post, Router};

use super::handlers::{capture_order, create_order};
use crate::adapters::http::AppState;

/// Payment routes, mounted at `/api/payments`. Both require authentication.
///
/// - `POST /create-order`
/// - `POST /capture-order`
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/capture-order", post(capture_order))
}
