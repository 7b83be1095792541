//! Capture verification.
//!
//! Decides, without I/O, whether a processor capture response proves that the
//! caller paid exactly the catalog price. Only a positive answer may lead to an
//! entitlement grant.

use serde::Serialize;
use serde_json::Value;

use crate::domain::catalog::PriceEntry;

/// Capture response as returned by the payment processor.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResponse {
    /// HTTP status of the capture call.
    pub status: u16,

    /// Decoded JSON body, passed through untouched.
    pub body: Value,
}

impl CaptureResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a capture was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The capture call itself answered with a non-2xx status.
    HttpStatus { status: u16 },

    /// The order status is something other than `COMPLETED`.
    NotCompleted { status: Option<String> },

    /// No capture amount could be found in the response.
    MissingCapture,

    /// The settled amount differs from the catalog price.
    AmountMismatch {
        expected_currency: String,
        expected_amount: String,
        actual_currency: String,
        actual_amount: String,
    },
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::HttpStatus { status } => {
                write!(f, "capture returned HTTP {}", status)
            }
            RejectionReason::NotCompleted { status: Some(s) } => {
                write!(f, "order status is {}", s)
            }
            RejectionReason::NotCompleted { status: None } => write!(f, "order status missing"),
            RejectionReason::MissingCapture => write!(f, "capture amount missing"),
            RejectionReason::AmountMismatch {
                expected_currency,
                expected_amount,
                actual_currency,
                actual_amount,
            } => write!(
                f,
                "paid {} {} but expected {} {}",
                actual_currency, actual_amount, expected_currency, expected_amount
            ),
        }
    }
}

/// Accepts the capture only if it completed for exactly `expected`.
///
/// Currency and value are compared as raw strings; `"5.0"` does not match
/// `"5.00"`.
pub fn verify_capture(response: &CaptureResponse, expected: &PriceEntry) -> Result<(), RejectionReason> {
    if !response.is_success() {
        return Err(RejectionReason::HttpStatus {
            status: response.status,
        });
    }

    let status = response.body.get("status").and_then(Value::as_str);
    if status != Some("COMPLETED") {
        return Err(RejectionReason::NotCompleted {
            status: status.map(str::to_string),
        });
    }

    let amount = response
        .body
        .pointer("/purchase_units/0/payments/captures/0/amount")
        .ok_or(RejectionReason::MissingCapture)?;

    let currency = amount.get("currency_code").and_then(Value::as_str);
    let value = amount.get("value").and_then(Value::as_str);

    let (currency, value) = match (currency, value) {
        (Some(c), Some(v)) => (c, v),
        _ => return Err(RejectionReason::MissingCapture),
    };

    if !expected.matches(currency, value) {
        return Err(RejectionReason::AmountMismatch {
            expected_currency: expected.currency.clone(),
            expected_amount: expected.amount.clone(),
            actual_currency: currency.to_string(),
            actual_amount: value.to_string(),
        });
    }

    Ok(())
}
