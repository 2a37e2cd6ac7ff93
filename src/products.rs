//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

/// Opaque product identifier, as issued by the catalog backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Catalog product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// Current unit price
    pub price: Money<'a, Currency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_compare_equal() {
        assert_eq!(ProductId::from(42), ProductId::from("42"));
    }

    #[test]
    fn display_writes_raw_identifier() {
        let id = ProductId::new("sku-001");

        assert_eq!(id.to_string(), "sku-001");
        assert_eq!(id.as_str(), "sku-001");
    }
}
