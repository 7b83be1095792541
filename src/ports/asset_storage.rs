//! Asset storage port - opens bound files for streaming.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use thiserror::Error;

/// Chunked file content.
pub type AssetStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, std::io::Error>> + Send>>;

/// An opened asset ready to stream.
pub struct OpenedAsset {
    pub stream: AssetStream,

    /// Size in bytes, when known up front.
    pub len: Option<u64>,
}

impl std::fmt::Debug for OpenedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedAsset").field("len", &self.len).finish()
    }
}

/// Port for reading downloadable assets.
///
/// `file_name` is a bare name; implementations resolve it under their own root
/// and must not follow it outside that root.
#[async_trait]
pub trait AssetStorage: Send + Sync {
    async fn open(&self, file_name: &str) -> Result<OpenedAsset, AssetStorageError>;
}

#[derive(Debug, Error)]
pub enum AssetStorageError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset I/O error: {0}")]
    Io(String),
}
