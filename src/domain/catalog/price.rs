//! Server-held price catalog.
//!
//! The catalog is the only source of truth for what a product costs. Clients
//! name a product; they never get to name a price. Amounts are canonical
//! fixed-point strings ("5.00") and are compared as strings, never parsed into
//! floating point.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::ProductId;

/// Products sold by the service, as `(product_id, currency, amount)`.
const STANDARD_PRICES: &[(&str, &str, &str)] = &[
    ("doc_small", "CAD", "5.00"),
    ("doc_pro", "CAD", "19.00"),
];

/// Exact price for a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceEntry {
    /// ISO 4217 currency code, upper case.
    pub currency: String,

    /// Decimal amount with exactly two fraction digits.
    pub amount: String,
}

impl PriceEntry {
    /// Creates a price entry, enforcing the canonical format.
    pub fn new(currency: impl Into<String>, amount: impl Into<String>) -> Result<Self, CatalogError> {
        let currency = currency.into();
        let amount = amount.into();

        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CatalogError::InvalidEntry(format!(
                "currency '{}' is not a 3-letter upper-case code",
                currency
            )));
        }
        if !is_canonical_amount(&amount) {
            return Err(CatalogError::InvalidEntry(format!(
                "amount '{}' is not a canonical two-decimal value",
                amount
            )));
        }

        Ok(Self { currency, amount })
    }

    /// True when `currency` and `amount` are byte-for-byte equal to this entry.
    pub fn matches(&self, currency: &str, amount: &str) -> bool {
        self.currency == currency && self.amount == amount
    }
}

fn is_canonical_amount(amount: &str) -> bool {
    match amount.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && whole.chars().all(|c| c.is_ascii_digit())
                && (whole == "0" || !whole.starts_with('0'))
                && frac.len() == 2
                && frac.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Catalog lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Invalid catalog entry: {0}")]
    InvalidEntry(String),
}

/// Immutable map from product to price.
#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    entries: BTreeMap<ProductId, PriceEntry>,
}

impl PriceCatalog {
    /// The catalog compiled into the service.
    pub fn standard() -> Self {
        let mut catalog = Self::default();
        for (product, currency, amount) in STANDARD_PRICES {
            // Compiled-in constants; a malformed row is a programming error caught by tests.
            if let (Ok(id), Ok(entry)) = (ProductId::new(*product), PriceEntry::new(*currency, *amount)) {
                catalog.entries.insert(id, entry);
            }
        }
        catalog
    }

    /// Builds a catalog from explicit entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (ProductId, PriceEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Returns the price for a product.
    pub fn lookup(&self, product_id: &ProductId) -> Result<&PriceEntry, CatalogError> {
        self.entries
            .get(product_id)
            .ok_or_else(|| CatalogError::UnknownProduct(product_id.to_string()))
    }

    /// Returns true if the product is sold.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.contains_key(product_id)
    }

    /// Iterates products in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &PriceEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
