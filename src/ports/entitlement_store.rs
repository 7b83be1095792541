//! Entitlement store port.
//!
//! Durable record of who bought what. Writes are idempotent upserts keyed by
//! `(user_id, product_id)`, so concurrent or repeated grants are safe without
//! locking.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::{ProductId, UserId};

/// Port for entitlement persistence.
///
/// # Contract
///
/// - `grant` inserts the pair or refreshes its `granted_at`; it never errors
///   because the row already exists.
/// - `has` reports failures as `Err`. It must never turn a failure into `false`.
/// - `list` returns `{product_id, granted_at}` rows for one user as JSON.
/// - `check_subject` rejects subject ids the backend cannot key rows by. It
///   runs before any money moves, so `grant` never meets such a subject after
///   a completed capture.
#[async_trait]
pub trait EntitlementStore: Send + Sync {
    /// Ok if rows can be written for this subject.
    fn check_subject(&self, _user_id: &UserId) -> Result<(), StoreError> {
        Ok(())
    }

    /// Record (or refresh) an entitlement.
    async fn grant(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), StoreError>;

    /// True if the user holds the product.
    async fn has(&self, user_id: &UserId, product_id: &ProductId) -> Result<bool, StoreError>;

    /// All of the user's entitlement rows.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Value>, StoreError>;
}

/// Entitlement store errors.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Backend could not be reached.
    #[error("Entitlement store unavailable: {0}")]
    Unavailable(String),

    /// Backend answered with a non-success status.
    #[error("Entitlement store returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Backend answer could not be decoded.
    #[error("Entitlement store response malformed: {0}")]
    Decode(String),

    /// Query failed inside the database.
    #[error("Entitlement store query failed: {0}")]
    Query(String),
}
