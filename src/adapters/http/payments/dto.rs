//! Request and response bodies for the payment endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /api/payments/create-order`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub product_id: String,
}

/// `POST /api/payments/capture-order`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOrderRequest {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub product_id: String,
}

/// Successful capture: `{ "ok": true, "order": {...} }`.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureOrderResponse {
    pub ok: bool,
    pub order: Value,
}

impl CaptureOrderResponse {
    pub fn granted(order: Value) -> Self {
        Self { ok: true, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn capture_request_reads_camel_case() {
        let req: CaptureOrderRequest =
            serde_json::from_value(json!({ "orderId": "O-1", "productId": "doc_pro" })).unwrap();
        assert_eq!(req.order_id, "O-1");
        assert_eq!(req.product_id, "doc_pro");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: CreateOrderRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.product_id.is_empty());
    }
}
