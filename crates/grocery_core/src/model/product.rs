//! Product domain model.
//!
//! # Invariants
//! - `Product::id` is store-assigned and positive.
//! - `shelf_life == None` means no expiry is tracked; there is no sentinel date.
//! - Name comparisons go through [`normalize_product_name`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-assigned product identity.
pub type ProductId = i64;

/// Product values supplied by a caller before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub stock: i64,
    pub shelf_life: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

impl NewProduct {
    /// Creates a product description without a shelf life.
    pub fn new(name: impl Into<String>, stock: i64, price: Decimal) -> Self {
        Self {
            name: name.into(),
            stock,
            shelf_life: None,
            price,
        }
    }

    pub fn with_shelf_life(mut self, shelf_life: NaiveDate) -> Self {
        self.shelf_life = Some(shelf_life);
        self
    }

    /// Binds these values to the identity assigned by the store.
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            stock: self.stock,
            shelf_life: self.shelf_life,
            price: self.price,
        }
    }
}

/// A persisted product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub stock: i64,
    pub shelf_life: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

impl Product {
    /// Returns the name in the form used for uniqueness checks.
    pub fn normalized_name(&self) -> String {
        normalize_product_name(&self.name)
    }
}

/// Normalizes a product name for uniqueness comparison: surrounding
/// whitespace is ignored and casing is folded.
pub fn normalize_product_name(name: &str) -> String {
    name.trim().to_lowercase()
}
