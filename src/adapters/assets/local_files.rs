//! Local filesystem asset storage.
//!
//! Serves files from a single documents directory:
//!
//! ```text
//! {root}/
//! ├── small-guide.pdf
//! └── pro-pack.pdf
//! ```
//!
//! Files are read in fixed-size chunks so large downloads never sit in memory.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use futures::stream;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::ports::{AssetStorage, AssetStorageError, OpenedAsset};

/// Read size per stream item.
const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct LocalAssetStorage {
    root: PathBuf,
}

impl LocalAssetStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins a bare file name onto the root. Anything with more than one
    /// normal path component is refused.
    fn resolve(&self, file_name: &str) -> Result<PathBuf, AssetStorageError> {
        let mut components = Path::new(file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.root.join(name)),
            _ => Err(AssetStorageError::NotFound(file_name.to_string())),
        }
    }
}

#[async_trait]
impl AssetStorage for LocalAssetStorage {
    async fn open(&self, file_name: &str) -> Result<OpenedAsset, AssetStorageError> {
        let path = self.resolve(file_name)?;

        let file = File::open(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => AssetStorageError::NotFound(file_name.to_string()),
            _ => AssetStorageError::Io(format!("{}: {}", path.display(), e)),
        })?;

        let metadata = file
            .metadata()
            .await
            .map_err(|e| AssetStorageError::Io(format!("{}: {}", path.display(), e)))?;
        if !metadata.is_file() {
            return Err(AssetStorageError::NotFound(file_name.to_string()));
        }

        let chunks = stream::try_unfold(file, |mut file| async move {
            let mut buf = vec![0u8; CHUNK_SIZE];
            let read = file.read(&mut buf).await?;
            if read == 0 {
                return Ok(None);
            }
            buf.truncate(read);
            Ok(Some((buf, file)))
        });

        Ok(OpenedAsset {
            stream: Box::pin(chunks),
            len: Some(metadata.len()),
        })
    }
}
