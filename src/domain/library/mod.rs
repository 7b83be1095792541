//! Library domain module.
//!
//! Paid documents and the rules for handing them out.
//!
//! # Module Structure
//!
//! - `binding` - Slug to product/file bindings
//! - `errors` - Library error type

mod binding;
mod errors;

pub use binding::{AssetBinding, AssetCatalog};
pub use errors::LibraryError;
