//! Journey data adapters.

mod procedures_file;

pub use procedures_file::{load_procedures, parse_procedures};
