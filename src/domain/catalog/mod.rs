//! Catalog module - what is for sale and at what exact price.

mod price;

pub use price::{CatalogError, PriceCatalog, PriceEntry};
