//! Purchase-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | UnknownProduct | 400 |
//! | ValidationFailed | 400 |
//! | Upstream | 502 |
//! | Configuration | 500 |
//! | Store | 500 |
//!
//! A capture that fails verification is not an error here; it is the
//! `Rejected` arm of [`super::PurchaseOutcome`].

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::ValidationError;

/// Errors raised while creating or capturing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// The product is not in the price catalog.
    UnknownProduct(String),

    /// Request input was missing or malformed.
    ValidationFailed { field: String, message: String },

    /// The payment processor failed or answered with a non-success status.
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// Processor credentials are missing or unusable.
    Configuration(String),

    /// Writing the entitlement failed after a verified capture.
    Store(String),
}

impl PurchaseError {
    pub fn unknown_product(product_id: impl Into<String>) -> Self {
        PurchaseError::UnknownProduct(product_id.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PurchaseError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        PurchaseError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        PurchaseError::Configuration(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        PurchaseError::Store(message.into())
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            PurchaseError::UnknownProduct(_) => "UNKNOWN_PRODUCT",
            PurchaseError::ValidationFailed { .. } => "VALIDATION_FAILED",
            PurchaseError::Upstream { .. } => "UPSTREAM_ERROR",
            PurchaseError::Configuration(_) => "CONFIGURATION_ERROR",
            PurchaseError::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            PurchaseError::UnknownProduct(id) => format!("Unknown product: {}", id),
            PurchaseError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PurchaseError::Upstream { status: Some(s), message } => {
                format!("Payment processor error ({}): {}", s, message)
            }
            PurchaseError::Upstream { status: None, message } => {
                format!("Payment processor unreachable: {}", message)
            }
            PurchaseError::Configuration(msg) => format!("Payment configuration error: {}", msg),
            PurchaseError::Store(msg) => format!("Entitlement store error: {}", msg),
        }
    }
}

impl std::fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PurchaseError {}

impl From<CatalogError> for PurchaseError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownProduct(id) => PurchaseError::UnknownProduct(id),
            CatalogError::InvalidEntry(msg) => PurchaseError::Configuration(msg),
        }
    }
}

impl From<ValidationError> for PurchaseError {
    fn from(err: ValidationError) -> Self {
        PurchaseError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
