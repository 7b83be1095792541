//! Library (gated download) error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | UnknownSlug | 404 |
//! | NotEntitled | 403 |
//! | FileMissing | 404 |
//! | InvalidBinding | 500 |
//! | Store | 502 |

/// Errors from entitlement listing and asset delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// No asset is bound to this slug.
    UnknownSlug(String),

    /// The caller holds no entitlement for the asset's product, or the
    /// entitlement check could not be completed.
    NotEntitled { slug: String },

    /// The binding exists but its file is absent on disk.
    FileMissing { slug: String, file_name: String },

    /// A binding is malformed.
    InvalidBinding { slug: String, reason: String },

    /// The entitlement store failed while listing rows.
    Store(String),
}

impl LibraryError {
    pub fn unknown_slug(slug: impl Into<String>) -> Self {
        LibraryError::UnknownSlug(slug.into())
    }

    pub fn not_entitled(slug: impl Into<String>) -> Self {
        LibraryError::NotEntitled { slug: slug.into() }
    }

    pub fn file_missing(slug: impl Into<String>, file_name: impl Into<String>) -> Self {
        LibraryError::FileMissing {
            slug: slug.into(),
            file_name: file_name.into(),
        }
    }

    pub fn invalid_binding(slug: impl Into<String>, reason: impl Into<String>) -> Self {
        LibraryError::InvalidBinding {
            slug: slug.into(),
            reason: reason.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        LibraryError::Store(message.into())
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            LibraryError::UnknownSlug(_) | LibraryError::FileMissing { .. } => "NOT_FOUND",
            LibraryError::NotEntitled { .. } => "FORBIDDEN",
            LibraryError::InvalidBinding { .. } => "CONFIGURATION_ERROR",
            LibraryError::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            LibraryError::UnknownSlug(slug) => format!("Unknown document: {}", slug),
            LibraryError::NotEntitled { slug } => {
                format!("Purchase required to download '{}'", slug)
            }
            // File names stay out of client-facing text.
            LibraryError::FileMissing { slug, .. } => format!("Document unavailable: {}", slug),
            LibraryError::InvalidBinding { slug, reason } => {
                format!("Invalid asset binding '{}': {}", slug, reason)
            }
            LibraryError::Store(msg) => format!("Entitlement store error: {}", msg),
        }
    }
}

impl std::fmt::Display for LibraryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LibraryError {}
