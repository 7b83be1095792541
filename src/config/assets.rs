//! Downloadable asset configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where documents live and how slugs bind to them
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding the downloadable files
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Optional YAML bindings file; the built-in bindings apply when absent
    #[serde(default)]
    pub bindings_file: Option<PathBuf>,
}

impl AssetsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.docs_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("ASSETS__DOCS_DIR"));
        }
        Ok(())
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            bindings_file: None,
        }
    }
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}
