//! CreateOrderHandler - Command handler for opening a processor order.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::catalog::PriceCatalog;
use crate::domain::foundation::{IdentityContext, ProductId};
use crate::domain::purchase::PurchaseError;
use crate::ports::{EntitlementStore, OrderRequest, PaymentProcessor};

/// Command to open an order for one catalog product.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub identity: IdentityContext,
    pub product_id: String,
}

/// Result of opening an order.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    /// Processor payload, passed through verbatim.
    pub order: Value,
}

/// Handler for opening orders.
///
/// The price always comes from the catalog. An unknown product, or a subject
/// the entitlement store cannot record, fails before any processor call.
pub struct CreateOrderHandler {
    catalog: Arc<PriceCatalog>,
    processor: Arc<dyn PaymentProcessor>,
    store: Arc<dyn EntitlementStore>,
}

impl CreateOrderHandler {
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

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, PurchaseError> {
        let product_id = ProductId::new(cmd.product_id.as_str())
            .map_err(|_| PurchaseError::unknown_product(cmd.product_id.as_str()))?;
        let price = self.catalog.lookup(&product_id)?.clone();
        self.store
            .check_subject(&cmd.identity.subject_id)
            .map_err(|e| PurchaseError::validation("sub", e.to_string()))?;

        let request = OrderRequest::new(product_id, price, cmd.identity.subject_id.clone());
        let order = self.processor.create_order(&request).await.map_err(|e| {
            tracing::warn!(
                user_id = %cmd.identity.subject_id,
                product_id = %request.product_id,
                status = ?e.status,
                body = e.body.as_deref().unwrap_or(""),
                "Order creation failed: {}",
                e
            );
            PurchaseError::from(e)
        })?;

        let order_id = order.get("id").and_then(Value::as_str).unwrap_or("");
        tracing::info!(
            user_id = %cmd.identity.subject_id,
            product_id = %request.product_id,
            order_id,
            "Order created"
        );

        Ok(CreateOrderResult { order })
    }
}
