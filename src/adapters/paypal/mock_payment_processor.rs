//! Mock payment processor for testing.
//!
//! Configurable stand-in for `PaymentProcessor`:
//! - Pre-configured order and capture responses
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::foundation::OrderId;
use crate::domain::purchase::CaptureResponse;
use crate::ports::{OrderRequest, PaymentError, PaymentProcessor};

/// Mock payment processor for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProcessor::new();
/// mock.set_capture(MockPaymentProcessor::completed_capture("ORDER1", "CAD", "5.00"));
/// let handler = CaptureOrderHandler::new(Arc::new(mock.clone()), ...);
/// assert_eq!(mock.call_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockPaymentProcessor {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_order: Option<Value>,
    next_capture: Option<CaptureResponse>,
    next_error: Option<PaymentError>,
    calls: Vec<ProcessorCall>,
}

/// Recorded call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorCall {
    CreateOrder { product_id: String, currency: String, amount: String },
    CaptureOrder { order_id: String },
}

impl MockPaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Body returned by the next `create_order`.
    pub fn set_order(&self, order: Value) {
        self.lock().next_order = Some(order);
    }

    /// Response returned by the next `capture_order`.
    pub fn set_capture(&self, capture: CaptureResponse) {
        self.lock().next_capture = Some(capture);
    }

    /// Error returned by the next call of either kind.
    pub fn set_error(&self, error: PaymentError) {
        self.lock().next_error = Some(error);
    }

    /// A `COMPLETED` capture settling `currency value`.
    pub fn completed_capture(order_id: &str, currency: &str, value: &str) -> CaptureResponse {
        CaptureResponse::new(
            201,
            json!({
                "id": order_id,
                "status": "COMPLETED",
                "purchase_units": [{
                    "payments": {
                        "captures": [{
                            "status": "COMPLETED",
                            "amount": { "currency_code": currency, "value": value }
                        }]
                    }
                }]
            }),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Inspection Methods
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<ProcessorCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only happens after a test already panicked.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl PaymentProcessor for MockPaymentProcessor {
    async fn create_order(&self, request: &OrderRequest) -> Result<Value, PaymentError> {
        let mut state = self.lock();
        state.calls.push(ProcessorCall::CreateOrder {
            product_id: request.product_id.to_string(),
            currency: request.price.currency.clone(),
            amount: request.price.amount.clone(),
        });
        if let Some(err) = state.next_error.take() {
            return Err(err);
        }
        Ok(state.next_order.take().unwrap_or_else(|| {
            json!({
                "id": "MOCK-ORDER-1",
                "status": "CREATED",
                "purchase_units": [{
                    "reference_id": request.product_id.as_str(),
                    "amount": {
                        "currency_code": request.price.currency,
                        "value": request.price.amount
                    }
                }]
            })
        }))
    }

    async fn capture_order(&self, order_id: &OrderId) -> Result<CaptureResponse, PaymentError> {
        let mut state = self.lock();
        state.calls.push(ProcessorCall::CaptureOrder {
            order_id: order_id.to_string(),
        });
        if let Some(err) = state.next_error.take() {
            return Err(err);
        }
        state
            .next_capture
            .take()
            .ok_or_else(|| PaymentError::decode("no capture configured on mock"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::PriceEntry;
    use crate::domain::foundation::{ProductId, UserId};

    fn request() -> OrderRequest {
        OrderRequest::new(
            ProductId::new("doc_small").unwrap(),
            PriceEntry::new("CAD", "5.00").unwrap(),
            UserId::new("u1").unwrap(),
        )
    }

    #[tokio::test]
    async fn default_order_echoes_request_price() {
        let mock = MockPaymentProcessor::new();
        let order = mock.create_order(&request()).await.unwrap();

        assert_eq!(order["purchase_units"][0]["amount"]["value"], "5.00");
        assert_eq!(
            mock.calls(),
            vec![ProcessorCall::CreateOrder {
                product_id: "doc_small".into(),
                currency: "CAD".into(),
                amount: "5.00".into(),
            }]
        );
    }

    #[tokio::test]
    async fn injected_error_is_returned_once() {
        let mock = MockPaymentProcessor::new();
        mock.set_error(PaymentError::network("down"));

        assert!(mock.create_order(&request()).await.is_err());
        assert!(mock.create_order(&request()).await.is_ok());
    }

    #[tokio::test]
    async fn capture_returns_configured_response() {
        let mock = MockPaymentProcessor::new();
        mock.set_capture(MockPaymentProcessor::completed_capture("O1", "CAD", "5.00"));

        let response = mock.capture_order(&OrderId::new("O1").unwrap()).await.unwrap();
        assert_eq!(response.body["status"], "COMPLETED");
        assert_eq!(mock.call_count(), 1);
    }
}
