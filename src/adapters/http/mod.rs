//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with handlers, routes, and an `ApiError` that
//! maps domain errors to status codes.

mod error;
pub mod journey;
pub mod library;
pub mod middleware;
pub mod payments;
mod router;
mod state;
pub mod system;

pub use error::ErrorResponse;
pub use router::{api_router, RouterConfig};
pub use state::AppState;
