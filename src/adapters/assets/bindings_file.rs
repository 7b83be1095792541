//! YAML asset bindings loader.
//!
//! ```yaml
//! assets:
//!   - slug: small-guide
//!     product_id: doc_small
//!     file_name: small-guide.pdf
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::library::{AssetBinding, AssetCatalog, LibraryError};

#[derive(Debug, Deserialize)]
struct BindingsFile {
    #[serde(default)]
    assets: Vec<AssetBinding>,
}

#[derive(Debug, Error)]
pub enum BindingsFileError {
    #[error("Failed to read bindings file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse bindings file: {0}")]
    Parse(String),

    #[error("Invalid binding: {0}")]
    Invalid(#[from] LibraryError),
}

/// Parses bindings from YAML text.
pub fn parse_bindings(yaml: &str) -> Result<AssetCatalog, BindingsFileError> {
    let file: BindingsFile =
        serde_yaml::from_str(yaml).map_err(|e| BindingsFileError::Parse(e.to_string()))?;
    Ok(AssetCatalog::from_bindings(file.assets)?)
}

/// Reads and parses a bindings file.
pub fn load_bindings(path: &Path) -> Result<AssetCatalog, BindingsFileError> {
    let yaml = std::fs::read_to_string(path).map_err(|e| BindingsFileError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_bindings(&yaml)
}
