//! HTTP handlers for payment endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{AppState, ErrorResponse};
use crate::application::handlers::{CaptureOrderCommand, CreateOrderCommand};
use crate::domain::purchase::{PurchaseError, PurchaseOutcome};

use super::dto::{CaptureOrderRequest, CaptureOrderResponse, CreateOrderRequest};

/// POST /api/payments/create-order - Create a processor order for a catalog product
pub async fn create_order(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let Json(request) = body.map_err(PaymentsApiError::from)?;

    let cmd = CreateOrderCommand {
        identity,
        product_id: request.product_id,
    };
    let result = state.create_order_handler().handle(cmd).await?;

    Ok(Json(result.order))
}

/// POST /api/payments/capture-order - Capture, verify, and grant
pub async fn capture_order(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    body: Result<Json<CaptureOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let Json(request) = body.map_err(PaymentsApiError::from)?;

    let cmd = CaptureOrderCommand {
        identity,
        order_id: request.order_id,
        product_id: request.product_id,
    };

    match state.capture_order_handler().handle(cmd).await? {
        PurchaseOutcome::Granted { order } => Ok(Json(CaptureOrderResponse::granted(order))),
        PurchaseOutcome::Rejected { order, .. } => Err(PaymentsApiError::PaymentNotVerified(order)),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// Errors surfaced by the payment endpoints.
#[derive(Debug)]
pub enum PaymentsApiError {
    Purchase(PurchaseError),

    /// Capture did not verify; the raw processor order is returned as the body.
    PaymentNotVerified(Value),

    BadRequest(String),
}

impl From<PurchaseError> for PaymentsApiError {
    fn from(err: PurchaseError) -> Self {
        Self::Purchase(err)
    }
}

impl From<JsonRejection> for PaymentsApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for PaymentsApiError {
    fn into_response(self) -> Response {
        let err = match self {
            PaymentsApiError::PaymentNotVerified(order) => {
                return (StatusCode::BAD_REQUEST, Json(order)).into_response();
            }
            PaymentsApiError::BadRequest(message) => {
                return ErrorResponse::new("BAD_REQUEST", message)
                    .with_status(StatusCode::BAD_REQUEST);
            }
            PaymentsApiError::Purchase(err) => err,
        };

        let status = match &err {
            PurchaseError::UnknownProduct(_) | PurchaseError::ValidationFailed { .. } => {
                StatusCode::BAD_REQUEST
            }
            PurchaseError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            PurchaseError::Configuration(_) | PurchaseError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status.is_server_error() {
            tracing::error!(code = err.code(), error = %err, "payment request failed");
            match &err {
                PurchaseError::Upstream { .. } => "Payment processor error".to_string(),
                PurchaseError::Store(_) => "Could not record purchase".to_string(),
                _ => "Payment service misconfigured".to_string(),
            }
        } else {
            err.message()
        };

        ErrorResponse::new(err.code(), message).with_status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: PaymentsApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn client_errors_are_400() {
        assert_eq!(
            status_of(PurchaseError::unknown_product("doc_free").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(PurchaseError::validation("order_id", "empty").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(PaymentsApiError::PaymentNotVerified(serde_json::json!({}))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn upstream_is_502_and_internal_failures_are_500() {
        assert_eq!(
            status_of(PurchaseError::upstream(Some(503), "down").into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(PurchaseError::store("timeout").into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(PurchaseError::configuration("no secret").into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn upstream_detail_is_not_returned_to_client() {
        let response: Response =
            PaymentsApiError::from(PurchaseError::upstream(Some(500), "INTERNAL_SERVICE_ERROR debug_id=abc"))
                .into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(!text.contains("debug_id"));
        assert!(text.contains("UPSTREAM_ERROR"));
    }
}
