//! HTTP adapter for purchased documents.
//!
//! - `GET /api/entitlements` - List the caller's entitlements
//! - `GET /api/docs/{slug}/download` - Stream a document the caller owns

pub mod handlers;
pub mod routes;

pub use handlers::LibraryApiError;
pub use routes::library_routes;
