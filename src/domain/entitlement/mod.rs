//! Entitlement domain module.
//!
//! An entitlement records that a user has paid for a product. Rows are keyed
//! by `(user_id, product_id)`, written idempotently, and never deleted.

use serde::Serialize;

use crate::domain::foundation::{ProductId, Timestamp, UserId};

/// Proof of purchase for one `(user, product)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entitlement {
    pub user_id: UserId,
    pub product_id: ProductId,

    /// Time of the most recent grant. A repeated grant moves it forward.
    pub granted_at: Timestamp,
}

impl Entitlement {
    /// Creates an entitlement granted now.
    pub fn grant(user_id: UserId, product_id: ProductId) -> Self {
        Self {
            user_id,
            product_id,
            granted_at: Timestamp::now(),
        }
    }

    /// Reconstitutes an entitlement from storage.
    pub fn reconstitute(user_id: UserId, product_id: ProductId, granted_at: Timestamp) -> Self {
        Self {
            user_id,
            product_id,
            granted_at,
        }
    }

    /// True if this row covers the given pair.
    pub fn covers(&self, user_id: &UserId, product_id: &ProductId) -> bool {
        &self.user_id == user_id && &self.product_id == product_id
    }
}
