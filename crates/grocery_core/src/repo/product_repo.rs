//! Product repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `Product` table.
//! - Own column encoding for dates and money.
//!
//! # Invariants
//! - `ShelfLife` is `YYYY-MM-DD` text or NULL; absence is never a sentinel date.
//! - `Price` is stored as REAL and decoded back to an exact decimal rounded to
//!   [`PRICE_SIGNIFICANT_DIGITS`] significant digits. Writes of a price that
//!   would not decode to the same value fail with [`RepoError::UnstorablePrice`].
//! - Construction ensures schema and seed rows exist.

use crate::db::schema::{PRODUCT_DDL, PRODUCT_SEED};
use crate::db::Database;
use crate::model::product::{NewProduct, Product, ProductId};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rusqlite::{params, Row};

const PRODUCT_SELECT_SQL: &str = "SELECT Id, Name, Stock, ShelfLife, Price FROM Product";
const SHELF_LIFE_FORMAT: &str = "%Y-%m-%d";

/// Significant digits kept when turning a stored REAL back into a decimal.
/// An f64 reliably represents 15 decimal digits.
pub const PRICE_SIGNIFICANT_DIGITS: u32 = 15;

/// Repository interface for product CRUD operations.
pub trait ProductRepository {
    /// Returns every product in store-natural row order.
    fn get_all(&self) -> RepoResult<Vec<Product>>;
    fn get(&self, id: ProductId) -> RepoResult<Option<Product>>;
    /// Inserts a product and returns it with the store-assigned id.
    fn add(&self, product: &NewProduct) -> RepoResult<Product>;
    /// Replaces all columns of the row with `product.id`.
    ///
    /// Returns `None` when no such row exists.
    fn update(&self, product: &Product) -> RepoResult<Option<Product>>;
    /// Deletes the row with `product.id` and returns the argument.
    ///
    /// Returns `None` when no such row exists.
    fn delete(&self, product: &Product) -> RepoResult<Option<Product>>;
}

/// SQLite-backed product repository.
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    db: Database,
}

impl SqliteProductRepository {
    /// Ensures the `Product` table and seed rows exist, then returns a
    /// repository bound to `db`.
    pub fn try_new(db: Database) -> RepoResult<Self> {
        db.create_table(PRODUCT_DDL)?;
        db.insert_multiple_with_transaction(PRODUCT_SEED)?;
        Ok(Self { db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl ProductRepository for SqliteProductRepository {
    fn get_all(&self) -> RepoResult<Vec<Product>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(PRODUCT_SELECT_SQL)?;
            let mut rows = stmt.query([])?;
            let mut products = Vec::new();

            while let Some(row) = rows.next()? {
                products.push(parse_product_row(row)?);
            }

            Ok(products)
        })
    }

    fn get(&self, id: ProductId) -> RepoResult<Option<Product>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!("{PRODUCT_SELECT_SQL} WHERE Id = ?1;"))?;
            let mut rows = stmt.query([id])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_product_row(row)?));
            }

            Ok(None)
        })
    }

    fn add(&self, product: &NewProduct) -> RepoResult<Product> {
        let price = price_to_db(product.price)?;

        let id = self.db.with_connection(|conn| {
            conn.query_row(
                "INSERT INTO Product (Name, Stock, ShelfLife, Price)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING Id;",
                params![
                    product.name.as_str(),
                    product.stock,
                    product.shelf_life.map(shelf_life_to_db),
                    price,
                ],
                |row| row.get::<_, ProductId>(0),
            )
            .map_err(RepoError::from)
        })?;

        info!("event=product_insert module=repo status=ok product_id={id}");
        Ok(product.clone().with_id(id))
    }

    fn update(&self, product: &Product) -> RepoResult<Option<Product>> {
        let price = price_to_db(product.price)?;

        let changed = self.db.with_connection(|conn| {
            conn.execute(
                "UPDATE Product
                 SET
                    Name = ?1,
                    Stock = ?2,
                    ShelfLife = ?3,
                    Price = ?4
                 WHERE Id = ?5;",
                params![
                    product.name.as_str(),
                    product.stock,
                    product.shelf_life.map(shelf_life_to_db),
                    price,
                    product.id,
                ],
            )
            .map_err(RepoError::from)
        })?;

        if changed == 0 {
            return Ok(None);
        }

        info!(
            "event=product_update module=repo status=ok product_id={}",
            product.id
        );
        Ok(Some(product.clone()))
    }

    fn delete(&self, product: &Product) -> RepoResult<Option<Product>> {
        let changed = self.db.with_connection(|conn| {
            conn.execute("DELETE FROM Product WHERE Id = ?1;", [product.id])
                .map_err(RepoError::from)
        })?;

        if changed == 0 {
            return Ok(None);
        }

        info!(
            "event=product_delete module=repo status=ok product_id={}",
            product.id
        );
        Ok(Some(product.clone()))
    }
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    let shelf_life = match row.get::<_, Option<String>>("ShelfLife")? {
        Some(value) => Some(parse_shelf_life(&value)?),
        None => None,
    };

    Ok(Product {
        id: row.get("Id")?,
        name: row.get("Name")?,
        stock: row.get("Stock")?,
        shelf_life,
        price: price_from_db(row.get("Price")?)?,
    })
}

fn shelf_life_to_db(date: NaiveDate) -> String {
    date.format(SHELF_LIFE_FORMAT).to_string()
}

fn parse_shelf_life(value: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, SHELF_LIFE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{value}` in Product.ShelfLife"))
    })
}

// Rejects prices that would come back different after a REAL round-trip.
fn price_to_db(price: Decimal) -> RepoResult<f64> {
    let stored = price.to_f64().ok_or(RepoError::UnstorablePrice(price))?;
    match price_from_db(stored) {
        Ok(loaded) if loaded == price => Ok(stored),
        _ => Err(RepoError::UnstorablePrice(price)),
    }
}

fn price_from_db(value: f64) -> RepoResult<Decimal> {
    Decimal::from_f64_retain(value)
        .and_then(|exact| {
            if exact.is_zero() {
                return Some(Decimal::ZERO);
            }
            exact.round_sf(PRICE_SIGNIFICANT_DIGITS)
        })
        .map(|rounded| rounded.normalize())
        .ok_or_else(|| RepoError::InvalidData(format!("invalid price `{value}` in Product.Price")))
}
