//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionValidator` - Bearer token verification
//! - `PaymentProcessor` - Order creation and capture
//! - `EntitlementStore` - Durable proof of purchase
//! - `AssetStorage` - Streaming of gated files

mod asset_storage;
mod entitlement_store;
mod payment_processor;
mod session_validator;

pub use asset_storage::{AssetStorage, AssetStorageError, AssetStream, OpenedAsset};
pub use entitlement_store::{EntitlementStore, StoreError};
pub use payment_processor::{OrderRequest, PaymentError, PaymentErrorCode, PaymentProcessor};
pub use session_validator::SessionValidator;
