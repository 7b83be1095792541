//! CaptureOrderHandler - Command handler for capturing an order and granting
//! the entitlement it pays for.

use std::sync::Arc;

use crate::domain::catalog::{PriceCatalog, PriceEntry};
use crate::domain::foundation::{IdentityContext, OrderId, ProductId, UserId};
use crate::domain::purchase::{verify_capture, PurchaseError, PurchaseOutcome, RejectionReason};
use crate::ports::{EntitlementStore, PaymentProcessor};

/// Command to capture an approved order.
#[derive(Debug, Clone)]
pub struct CaptureOrderCommand {
    pub identity: IdentityContext,
    pub order_id: String,
    pub product_id: String,
}

/// Handler for order capture.
///
/// Flow: validate input, capture once, verify against the catalog, and only
/// then write the entitlement. Nothing is retried.
///
/// Capture, verification and grant run on a spawned task. Dropping the
/// `handle` future (request timeout, client disconnect) does not stop a
/// capture that has been sent from reaching its grant.
pub struct CaptureOrderHandler {
    catalog: Arc<PriceCatalog>,
    processor: Arc<dyn PaymentProcessor>,
    store: Arc<dyn EntitlementStore>,
}

impl CaptureOrderHandler {
    pub fn new(
        catalog: Arc<PriceCatalog>,
        processor: Arc<dyn PaymentProcessor>,
        store: Arc<dyn EntitlementStore>,
    ) -> Self {
        Self {
            catalog,
            processor,
            store,
        }
    }

    pub async fn handle(&self, cmd: CaptureOrderCommand) -> Result<PurchaseOutcome, PurchaseError> {
        let product_id = ProductId::new(cmd.product_id.as_str())
            .map_err(|_| PurchaseError::unknown_product(cmd.product_id.as_str()))?;
        let price = self.catalog.lookup(&product_id)?.clone();
        let order_id = OrderId::new(cmd.order_id.as_str())?;
        let user_id = cmd.identity.subject_id;
        self.store
            .check_subject(&user_id)
            .map_err(|e| PurchaseError::validation("sub", e.to_string()))?;

        let settlement = Settlement {
            processor: self.processor.clone(),
            store: self.store.clone(),
            user_id,
            product_id,
            order_id,
            price,
        };
        let order_id = settlement.order_id.clone();

        tokio::spawn(settlement.run()).await.map_err(|e| {
            tracing::error!(order_id = %order_id, "Capture task did not finish: {}", e);
            PurchaseError::store("capture task did not finish")
        })?
    }
}

/// One capture, owned so it can outlive the request that started it.
struct Settlement {
    processor: Arc<dyn PaymentProcessor>,
    store: Arc<dyn EntitlementStore>,
    user_id: UserId,
    product_id: ProductId,
    order_id: OrderId,
    price: PriceEntry,
}

impl Settlement {
    async fn run(self) -> Result<PurchaseOutcome, PurchaseError> {
        let Settlement {
            processor,
            store,
            user_id,
            product_id,
            order_id,
            price,
        } = self;

        let response = processor.capture_order(&order_id).await.map_err(|e| {
            tracing::warn!(
                user_id = %user_id,
                order_id = %order_id,
                status = ?e.status,
                body = e.body.as_deref().unwrap_or(""),
                "Order capture failed: {}",
                e
            );
            PurchaseError::from(e)
        })?;

        match verify_capture(&response, &price) {
            Ok(()) => {
                store.grant(&user_id, &product_id).await.map_err(|e| {
                    tracing::error!(
                        user_id = %user_id,
                        product_id = %product_id,
                        order_id = %order_id,
                        "Entitlement write failed after verified capture: {}",
                        e
                    );
                    PurchaseError::store(e.to_string())
                })?;

                tracing::info!(
                    user_id = %user_id,
                    product_id = %product_id,
                    order_id = %order_id,
                    "Entitlement granted"
                );
                Ok(PurchaseOutcome::Granted {
                    order: response.body,
                })
            }
            Err(RejectionReason::HttpStatus { status }) => {
                tracing::warn!(
                    order_id = %order_id,
                    status,
                    body = %response.body,
                    "Processor refused capture"
                );
                Err(PurchaseError::upstream(Some(status), "capture refused by processor"))
            }
            Err(reason) => {
                tracing::warn!(
                    user_id = %user_id,
                    product_id = %product_id,
                    order_id = %order_id,
                    reason = %reason,
                    "Capture not verified; no entitlement written"
                );
                Ok(PurchaseOutcome::Rejected {
                    reason,
                    order: response.body,
                })
            }
        }
    }
}
