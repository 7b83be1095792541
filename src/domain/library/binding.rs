//! Slug to product/file bindings for downloadable assets.

use std::collections::HashMap;

use serde::Deserialize;

use super::LibraryError;
use crate::domain::foundation::ProductId;

/// Default bindings, as `(slug, product_id, file_name)`.
const STANDARD_BINDINGS: &[(&str, &str, &str)] = &[
    ("small-guide", "doc_small", "small-guide.pdf"),
    ("pro-pack", "doc_pro", "pro-pack.pdf"),
];

/// One downloadable asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetBinding {
    /// Public name used in download URLs.
    pub slug: String,

    /// Product whose entitlement unlocks the file.
    pub product_id: ProductId,

    /// Bare file name under the documents root.
    pub file_name: String,
}

impl AssetBinding {
    /// Creates a binding, rejecting file names that could escape the documents root.
    pub fn new(
        slug: impl Into<String>,
        product_id: ProductId,
        file_name: impl Into<String>,
    ) -> Result<Self, LibraryError> {
        let binding = Self {
            slug: slug.into(),
            product_id,
            file_name: file_name.into(),
        };
        binding.validate()?;
        Ok(binding)
    }

    fn validate(&self) -> Result<(), LibraryError> {
        if self.slug.trim().is_empty() {
            return Err(LibraryError::invalid_binding(&self.slug, "slug is empty"));
        }
        let name = self.file_name.as_str();
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0')
        {
            return Err(LibraryError::invalid_binding(
                &self.slug,
                format!("file name '{}' is not a bare file name", name),
            ));
        }
        Ok(())
    }

    /// MIME type derived from the file extension. Unknown extensions are served as PDF.
    pub fn content_type(&self) -> &'static str {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("zip") => "application/zip",
            Some("epub") => "application/epub+zip",
            Some("txt") => "text/plain; charset=utf-8",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            _ => "application/pdf",
        }
    }

    /// `Content-Disposition` value forcing a download under the bound file name.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name.replace('"', ""))
    }
}

/// Immutable slug lookup table.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    bindings: HashMap<String, AssetBinding>,
}

impl AssetCatalog {
    /// The bindings compiled into the service.
    pub fn standard() -> Self {
        let mut catalog = Self::default();
        for (slug, product, file) in STANDARD_BINDINGS {
            if let Ok(product_id) = ProductId::new(*product) {
                if let Ok(binding) = AssetBinding::new(*slug, product_id, *file) {
                    catalog.bindings.insert(binding.slug.clone(), binding);
                }
            }
        }
        catalog
    }

    /// Builds a table from explicit bindings. Every binding is validated and
    /// slugs must be unique.
    pub fn from_bindings(bindings: Vec<AssetBinding>) -> Result<Self, LibraryError> {
        let mut table = HashMap::with_capacity(bindings.len());
        for binding in bindings {
            binding.validate()?;
            if table.contains_key(&binding.slug) {
                return Err(LibraryError::invalid_binding(&binding.slug, "duplicate slug"));
            }
            table.insert(binding.slug.clone(), binding);
        }
        Ok(Self { bindings: table })
    }

    /// Finds the binding for a slug.
    pub fn resolve(&self, slug: &str) -> Result<&AssetBinding, LibraryError> {
        self.bindings
            .get(slug)
            .ok_or_else(|| LibraryError::unknown_slug(slug))
    }

    /// All bindings, sorted by slug.
    pub fn bindings(&self) -> Vec<&AssetBinding> {
        let mut all: Vec<_> = self.bindings.values().collect();
        all.sort_by(|a, b| a.slug.cmp(&b.slug));
        all
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
