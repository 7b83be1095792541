//! Strongly-typed identifier value objects.
//!
//! All identifiers here are opaque strings owned by someone else: the identity
//! provider issues `UserId`, the catalog defines `ProductId`, and the payment
//! processor assigns `OrderId`. None of them are generated locally.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// User identifier (the `sub` claim from the identity provider).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog product identifier, e.g. `doc_small`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new ProductId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("product_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order identifier assigned by the payment processor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new OrderId.
    ///
    /// Order ids end up in a URL path segment, so anything outside
    /// `[A-Za-z0-9_-]` is rejected along with the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("order_id"));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "order_id",
                "only letters, digits, '-' and '_' are allowed",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_accepts_non_empty_string() {
        let id = UserId::new("user-123").unwrap();
        assert_eq!(id.as_str(), "user-123");
    }

    #[test]
    fn user_id_rejects_empty_string() {
        let result = UserId::new("");
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "user_id"),
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn user_id_rejects_whitespace() {
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn product_id_displays_correctly() {
        let id = ProductId::new("doc_small").unwrap();
        assert_eq!(format!("{}", id), "doc_small");
    }

    #[test]
    fn product_id_rejects_empty_string() {
        assert!(ProductId::new("").is_err());
    }

    #[test]
    fn order_id_accepts_processor_style_ids() {
        let id = OrderId::new("5O190127TN364715T").unwrap();
        assert_eq!(id.as_str(), "5O190127TN364715T");
    }

    #[test]
    fn order_id_rejects_empty_string() {
        assert!(matches!(
            OrderId::new(""),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn order_id_rejects_path_traversal() {
        assert!(matches!(
            OrderId::new("../v1/oauth2/token"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(OrderId::new("abc/capture").is_err());
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = ProductId::new("doc_pro").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"doc_pro\"");
    }
}
