//! Table definitions and fixed seed rows.
//!
//! # Invariants
//! - Every DDL statement is `IF NOT EXISTS`.
//! - Every seed statement is `INSERT OR IGNORE` and carries a value that hits
//!   a uniqueness constraint on re-run (product name, item id).

/// DDL for the `Product` table and its normalized-name unique index.
pub const PRODUCT_DDL: &str = include_str!("schema/product.sql");

/// DDL for the `GroceryListItem` table.
pub const GROCERY_LIST_ITEM_DDL: &str = include_str!("schema/grocery_list_item.sql");

pub const PRODUCT_SEED: &[&str] = &[
    "INSERT OR IGNORE INTO Product (Name, Stock, ShelfLife, Price) VALUES ('Melk', 300, '2025-09-25', 0.95);",
    "INSERT OR IGNORE INTO Product (Name, Stock, ShelfLife, Price) VALUES ('Kaas', 100, '2025-09-30', 7.98);",
    "INSERT OR IGNORE INTO Product (Name, Stock, ShelfLife, Price) VALUES ('Brood', 400, '2025-09-12', 2.19);",
    "INSERT OR IGNORE INTO Product (Name, Stock, ShelfLife, Price) VALUES ('Cornflakes', 0, '2025-12-31', 1.48);",
];

pub const GROCERY_LIST_ITEM_SEED: &[&str] = &[
    "INSERT OR IGNORE INTO GroceryListItem (Id, GroceryListId, ProductId, Amount) VALUES (1, 1, 1, 3);",
    "INSERT OR IGNORE INTO GroceryListItem (Id, GroceryListId, ProductId, Amount) VALUES (2, 1, 2, 1);",
    "INSERT OR IGNORE INTO GroceryListItem (Id, GroceryListId, ProductId, Amount) VALUES (3, 1, 3, 4);",
    "INSERT OR IGNORE INTO GroceryListItem (Id, GroceryListId, ProductId, Amount) VALUES (4, 2, 1, 2);",
    "INSERT OR IGNORE INTO GroceryListItem (Id, GroceryListId, ProductId, Amount) VALUES (5, 2, 2, 5);",
];
