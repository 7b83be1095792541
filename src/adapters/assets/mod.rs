//! Downloadable asset adapters.

mod bindings_file;
mod local_files;

pub use bindings_file::{load_bindings, parse_bindings, BindingsFileError};
pub use local_files::LocalAssetStorage;
