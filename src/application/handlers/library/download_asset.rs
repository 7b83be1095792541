//! DownloadAssetHandler - Query handler for gated file delivery.

use std::sync::Arc;

use crate::domain::foundation::IdentityContext;
use crate::domain::library::{AssetBinding, AssetCatalog, LibraryError};
use crate::ports::{AssetStorage, AssetStorageError, EntitlementStore, OpenedAsset};

/// Query to download the asset bound to `slug`.
#[derive(Debug, Clone)]
pub struct DownloadAssetQuery {
    pub identity: IdentityContext,
    pub slug: String,
}

/// An asset cleared for delivery.
#[derive(Debug)]
pub struct DownloadAssetResult {
    pub binding: AssetBinding,
    pub asset: OpenedAsset,
}

/// Handler for gated downloads.
///
/// Fails closed: if the entitlement check cannot be answered, the caller is
/// treated as not entitled.
pub struct DownloadAssetHandler {
    assets: Arc<AssetCatalog>,
    store: Arc<dyn EntitlementStore>,
    storage: Arc<dyn AssetStorage>,
}

impl DownloadAssetHandler {
    pub fn new(
        assets: Arc<AssetCatalog>,
        store: Arc<dyn EntitlementStore>,
        storage: Arc<dyn AssetStorage>,
    ) -> Self {
        Self {
            assets,
            store,
            storage,
        }
    }

    pub async fn handle(&self, query: DownloadAssetQuery) -> Result<DownloadAssetResult, LibraryError> {
        let binding = self.assets.resolve(&query.slug)?.clone();
        let user_id = &query.identity.subject_id;

        let entitled = match self.store.has(user_id, &binding.product_id).await {
            Ok(entitled) => entitled,
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    product_id = %binding.product_id,
                    "Entitlement check failed, denying download: {}",
                    e
                );
                false
            }
        };
        if !entitled {
            return Err(LibraryError::not_entitled(&binding.slug));
        }

        let asset = self.storage.open(&binding.file_name).await.map_err(|e| {
            match &e {
                AssetStorageError::NotFound(_) => tracing::error!(
                    slug = %binding.slug,
                    file_name = %binding.file_name,
                    "Bound asset missing on disk"
                ),
                AssetStorageError::Io(_) => tracing::error!(
                    slug = %binding.slug,
                    file_name = %binding.file_name,
                    "Bound asset unreadable: {}",
                    e
                ),
            }
            LibraryError::file_missing(&binding.slug, &binding.file_name)
        })?;

        tracing::info!(user_id = %user_id, slug = %binding.slug, "Asset download started");

        Ok(DownloadAssetResult { binding, asset })
    }
}
