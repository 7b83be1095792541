//! Top-level axum router.
//!
//! ```text
//! /api/health                      public
//! /api/journey                     public
//! /api/whoami                      bearer
//! /api/payments/create-order       bearer
//! /api/payments/capture-order      bearer
//! /api/entitlements                bearer
//! /api/docs/:slug/download         bearer
//! ```

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::journey::journey_routes;
use super::library::library_routes;
use super::middleware::auth_middleware;
use super::payments::payment_routes;
use super::system::{protected_system_routes, public_system_routes};
use super::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// JSON bodies on this API are a few fields; anything larger is refused.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed browser origins. `*` allows any; empty allows none.
    pub cors_origins: Vec<String>,

    pub request_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(90),
        }
    }
}

/// Builds the full application router.
pub fn api_router(state: AppState, config: &RouterConfig) -> Router {
    let protected = Router::new()
        .merge(protected_system_routes())
        .nest("/payments", payment_routes())
        .merge(library_routes())
        .route_layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ));

    let public = Router::new()
        .merge(public_system_routes())
        .merge(journey_routes());

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(cors_layer(&config.cors_origins))
                .layer(TimeoutLayer::new(config.request_timeout))
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
}
