//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the verified caller identity, and
//! validation errors that form the vocabulary of the service.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, IdentityContext};
pub use errors::ValidationError;
pub use ids::{OrderId, ProductId, UserId};
pub use timestamp::Timestamp;
