//! Core inventory logic for the grocery app.
//! This crate is the single source of truth for product and grocery list
//! invariants; presentation layers call it synchronously.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{Database, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::grocery_list_item::{
    GroceryListId, GroceryListItem, GroceryListItemId, NewGroceryListItem,
};
pub use model::product::{normalize_product_name, NewProduct, Product, ProductId};
pub use repo::grocery_list_item_repo::{
    GroceryListItemRepository, SqliteGroceryListItemRepository,
};
pub use repo::product_repo::{ProductRepository, SqliteProductRepository};
pub use repo::{RepoError, RepoResult};
pub use service::product_service::{
    ProductField, ProductService, ProductServiceError, ProductServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
