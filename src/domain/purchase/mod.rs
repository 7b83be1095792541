//! Purchase domain module.
//!
//! Two-phase purchase of a catalog product: create an order with the payment
//! processor, then capture it and verify the settled amount.
//!
//! # Module Structure
//!
//! - `capture_verifier` - Pure check of a capture response against the catalog
//! - `errors` - Purchase error type
//! - `outcome` - Terminal state of a capture attempt

mod capture_verifier;
mod errors;
mod outcome;

pub use capture_verifier::{verify_capture, CaptureResponse, RejectionReason};
pub use errors::PurchaseError;
pub use outcome::PurchaseOutcome;
