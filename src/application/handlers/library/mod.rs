//! Library handlers.
//!
//! ## Queries
//! - Listing the caller's entitlements
//! - Downloading a gated asset

mod download_asset;
mod list_entitlements;

pub use download_asset::{DownloadAssetHandler, DownloadAssetQuery, DownloadAssetResult};
pub use list_entitlements::{
    ListEntitlementsHandler, ListEntitlementsQuery, ListEntitlementsResult,
};
