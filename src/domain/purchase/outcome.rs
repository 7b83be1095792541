//! Terminal state of a capture attempt.

use serde_json::Value;

use super::RejectionReason;

/// Result of one capture attempt for an order.
///
/// An order goes `CREATED -> capture attempt -> Granted | Rejected`. There is
/// no pending state; the caller starts over with a new order on rejection.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    /// Payment verified and the entitlement recorded.
    Granted { order: Value },

    /// Payment did not verify. Nothing was written.
    Rejected { reason: RejectionReason, order: Value },
}

impl PurchaseOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, PurchaseOutcome::Granted { .. })
    }

    /// Raw processor order, whichever way the attempt ended.
    pub fn order(&self) -> &Value {
        match self {
            PurchaseOutcome::Granted { order } | PurchaseOutcome::Rejected { order, .. } => order,
        }
    }
}
