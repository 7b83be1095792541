//! Purchase handlers.
//!
//! ## Commands
//! - Opening an order for a catalog product
//! - Capturing an order and granting its entitlement

mod capture_order;
mod create_order;

pub use capture_order::{CaptureOrderCommand, CaptureOrderHandler};
pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
