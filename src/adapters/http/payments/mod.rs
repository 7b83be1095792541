//! HTTP adapter for payment endpoints.
//!
//! - `POST /api/payments/create-order` - Create a PayPal order for a product
//! - `POST /api/payments/capture-order` - Capture, verify, and record the entitlement

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PaymentsApiError;
pub use routes::payment_routes;
