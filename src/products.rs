//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque product identifier, unique within a cart.
///
/// The backend keys products by integer primary keys, but nothing here relies on that:
/// identifiers are compared as text and only serialised back as numbers when they look like one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<u64>() {
            Ok(numeric) => serializer.serialize_u64(numeric),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(number) => Self::from(number),
            Raw::Text(text) => Self(text),
        })
    }
}

/// Point-in-time read of a product used to populate or validate cart operations.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot<'a> {
    /// Product identifier
    pub product_id: ProductId,

    /// Display label, copied into line items at add-time
    pub name: String,

    /// Unit price
    pub unit_price: Money<'a, Currency>,

    /// Stock ceiling; `None` when no ceiling applies (invoice drafting).
    pub available_stock: Option<u32>,
}

impl<'a> CatalogSnapshot<'a> {
    /// Creates a snapshot without a stock ceiling.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            available_stock: None,
        }
    }

    /// Returns the snapshot with the given stock ceiling.
    #[must_use]
    pub fn with_stock(mut self, available: u32) -> Self {
        self.available_stock = Some(available);
        self
    }

    /// Returns the snapshot with any stock ceiling removed.
    #[must_use]
    pub fn without_stock_ceiling(mut self) -> Self {
        self.available_stock = None;
        self
    }
}
