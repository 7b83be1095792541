//! Command and query handlers.
//!
//! - `purchase` - Order creation and capture
//! - `library` - Entitlement listing and gated downloads
//! - `journey` - Procedural journey lookup

pub mod journey;
pub mod library;
pub mod purchase;

pub use journey::{BuildJourneyHandler, BuildJourneyQuery};
pub use library::{
    DownloadAssetHandler, DownloadAssetQuery, DownloadAssetResult, ListEntitlementsHandler,
    ListEntitlementsQuery, ListEntitlementsResult,
};
pub use purchase::{
    CaptureOrderCommand, CaptureOrderHandler, CreateOrderCommand, CreateOrderHandler,
    CreateOrderResult,
};
