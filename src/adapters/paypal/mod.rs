//! PayPal payment processor adapter.
//!
//! Implements the `PaymentProcessor` port for PayPal Orders v2:
//! - OAuth2 client-credentials token exchange
//! - Order creation for a catalog price
//! - Order capture
//!
//! # Security
//!
//! - Client secret is held as `secrecy::SecretString`
//! - Order ids are validated before they are placed in a URL path
//! - All calls carry a bounded timeout

mod mock_payment_processor;
mod paypal_adapter;
mod types;

pub use mock_payment_processor::{MockPaymentProcessor, ProcessorCall};
pub use paypal_adapter::{PayPalAdapter, PayPalConfig, PayPalEnvironment};
