//! Grocery list line items.

use crate::model::product::ProductId;
use serde::{Deserialize, Serialize};

/// Store-assigned grocery list item identity.
pub type GroceryListItemId = i64;

/// Identity of a grocery list. The list entity itself lives outside this crate.
pub type GroceryListId = i64;

/// Line item values supplied by a caller before persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGroceryListItem {
    pub grocery_list_id: GroceryListId,
    pub product_id: ProductId,
    pub amount: i64,
}

impl NewGroceryListItem {
    pub fn new(grocery_list_id: GroceryListId, product_id: ProductId, amount: i64) -> Self {
        Self {
            grocery_list_id,
            product_id,
            amount,
        }
    }

    /// Binds these values to the identity assigned by the store.
    pub fn with_id(self, id: GroceryListItemId) -> GroceryListItem {
        GroceryListItem {
            id,
            grocery_list_id: self.grocery_list_id,
            product_id: self.product_id,
            amount: self.amount,
        }
    }
}

/// A persisted grocery list item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryListItem {
    pub id: GroceryListItemId,
    pub grocery_list_id: GroceryListId,
    pub product_id: ProductId,
    pub amount: i64,
}
