//! Payment processor port for two-phase (create, capture) orders.
//!
//! The processor owns order state. This side only asks it to create an order
//! for a catalog price and later to capture that order, then inspects what
//! comes back.
//!
//! # Contract
//!
//! - Request bodies are built from the catalog entry passed in; a client never
//!   supplies an amount.
//! - `create_order` returns the processor payload verbatim on 2xx and an error
//!   otherwise.
//! - `capture_order` returns status and decoded body for every HTTP answer,
//!   including non-2xx. It errors only when the call or decoding fails.
//! - Implementations never retry a capture that the processor may have executed.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::catalog::PriceEntry;
use crate::domain::foundation::{OrderId, ProductId, UserId};
use crate::domain::purchase::{CaptureResponse, PurchaseError};

/// Port for the external payment processor.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create an order for one product at its catalog price.
    async fn create_order(&self, request: &OrderRequest) -> Result<Value, PaymentError>;

    /// Capture a previously approved order.
    async fn capture_order(&self, order_id: &OrderId) -> Result<CaptureResponse, PaymentError>;
}

/// Everything needed to open an order with the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Product being bought; sent as the purchase unit reference.
    pub product_id: ProductId,

    /// Catalog price for the product.
    pub price: PriceEntry,

    /// Buyer, for logging only. Not sent to the processor.
    pub buyer: UserId,
}

impl OrderRequest {
    pub fn new(product_id: ProductId, price: PriceEntry, buyer: UserId) -> Self {
        Self {
            product_id,
            price,
            buyer,
        }
    }
}

/// Errors from payment processor operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// HTTP status from the processor, if one was received.
    pub status: Option<u16>,

    /// Raw response body, kept for logs.
    pub body: Option<String>,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Attach the processor's HTTP status and body.
    pub fn with_response(mut self, status: u16, body: impl Into<String>) -> Self {
        self.status = Some(status);
        self.body = Some(body.into());
        self
    }

    /// Credentials are absent or unusable.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Configuration, message)
    }

    /// The token exchange was refused.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Authentication, message)
    }

    /// Transport failure or timeout.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Network, message)
    }

    /// Non-success HTTP answer.
    pub fn upstream_status(status: u16, body: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::UpstreamStatus, format!("processor returned {}", status))
            .with_response(status, body)
    }

    /// Response body could not be decoded.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Decode, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for PurchaseError {
    fn from(err: PaymentError) -> Self {
        match err.code {
            PaymentErrorCode::Configuration => PurchaseError::configuration(err.message),
            _ => PurchaseError::upstream(err.status, err.message),
        }
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentErrorCode {
    /// Missing or unusable credentials.
    Configuration,

    /// Token exchange refused.
    Authentication,

    /// Transport failure or timeout.
    Network,

    /// Processor answered with a non-success status.
    UpstreamStatus,

    /// Body could not be decoded as JSON.
    Decode,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::Configuration => "configuration_error",
            PaymentErrorCode::Authentication => "authentication_error",
            PaymentErrorCode::Network => "network_error",
            PaymentErrorCode::UpstreamStatus => "upstream_status",
            PaymentErrorCode::Decode => "decode_error",
        };
        write!(f, "{}", s)
    }
}
