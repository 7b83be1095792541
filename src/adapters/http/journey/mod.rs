//! HTTP adapter for journey lookups.
//!
//! - `GET /api/journey?province=&venue=&issue=` - Public, no authentication

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use serde::Deserialize;

use crate::adapters::http::AppState;
use crate::application::handlers::BuildJourneyQuery;

/// Query string for `GET /api/journey`. Absent parameters are empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JourneyParams {
    pub province: String,
    pub venue: String,
    pub issue: String,
}

/// GET /api/journey - Procedural steps for a province, venue, and issue
pub async fn get_journey(
    State(state): State<AppState>,
    Query(params): Query<JourneyParams>,
) -> impl IntoResponse {
    let lookup = state.build_journey_handler().handle(BuildJourneyQuery {
        province: params.province,
        venue: params.venue,
        issue: params.issue,
    });
    Json(lookup)
}

pub fn journey_routes() -> Router<AppState> {
    Router::new().route("/journey", get(get_journey))
}
