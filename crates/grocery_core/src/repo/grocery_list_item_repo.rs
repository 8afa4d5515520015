//! Grocery list item repository contract and SQLite implementation.
//!
//! # Invariants
//! - All four columns are plain integers; no NULL handling is needed.
//! - Construction ensures schema and seed rows exist.

use crate::db::schema::{GROCERY_LIST_ITEM_DDL, GROCERY_LIST_ITEM_SEED};
use crate::db::Database;
use crate::model::grocery_list_item::{
    GroceryListId, GroceryListItem, GroceryListItemId, NewGroceryListItem,
};
use crate::repo::{RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, Params, Row};

const ITEM_SELECT_SQL: &str = "SELECT Id, GroceryListId, ProductId, Amount FROM GroceryListItem";

/// Repository interface for grocery list item CRUD operations.
pub trait GroceryListItemRepository {
    fn get_all(&self) -> RepoResult<Vec<GroceryListItem>>;
    /// Returns the items whose `grocery_list_id` equals `list_id`, in
    /// store-natural row order.
    fn get_all_on_grocery_list_id(&self, list_id: GroceryListId)
        -> RepoResult<Vec<GroceryListItem>>;
    fn get(&self, id: GroceryListItemId) -> RepoResult<Option<GroceryListItem>>;
    fn add(&self, item: &NewGroceryListItem) -> RepoResult<GroceryListItem>;
    /// Returns `None` when no row has `item.id`.
    fn update(&self, item: &GroceryListItem) -> RepoResult<Option<GroceryListItem>>;
    /// Returns `None` when no row has `item.id`.
    fn delete(&self, item: &GroceryListItem) -> RepoResult<Option<GroceryListItem>>;
}

/// SQLite-backed grocery list item repository.
#[derive(Debug, Clone)]
pub struct SqliteGroceryListItemRepository {
    db: Database,
}

impl SqliteGroceryListItemRepository {
    /// Ensures the `GroceryListItem` table and seed rows exist, then returns a
    /// repository bound to `db`.
    pub fn try_new(db: Database) -> RepoResult<Self> {
        db.create_table(GROCERY_LIST_ITEM_DDL)?;
        db.insert_multiple_with_transaction(GROCERY_LIST_ITEM_SEED)?;
        Ok(Self { db })
    }
}

impl GroceryListItemRepository for SqliteGroceryListItemRepository {
    fn get_all(&self) -> RepoResult<Vec<GroceryListItem>> {
        self.db
            .with_connection(|conn| query_items(conn, &format!("{ITEM_SELECT_SQL};"), []))
    }

    fn get_all_on_grocery_list_id(
        &self,
        list_id: GroceryListId,
    ) -> RepoResult<Vec<GroceryListItem>> {
        self.db.with_connection(|conn| {
            query_items(
                conn,
                &format!("{ITEM_SELECT_SQL} WHERE GroceryListId = ?1;"),
                [list_id],
            )
        })
    }

    fn get(&self, id: GroceryListItemId) -> RepoResult<Option<GroceryListItem>> {
        let mut items = self.db.with_connection(|conn| {
            query_items(conn, &format!("{ITEM_SELECT_SQL} WHERE Id = ?1;"), [id])
        })?;
        Ok(items.pop())
    }

    fn add(&self, item: &NewGroceryListItem) -> RepoResult<GroceryListItem> {
        let id = self.db.with_connection(|conn| {
            conn.query_row(
                "INSERT INTO GroceryListItem (GroceryListId, ProductId, Amount)
                 VALUES (?1, ?2, ?3)
                 RETURNING Id;",
                params![item.grocery_list_id, item.product_id, item.amount],
                |row| row.get::<_, GroceryListItemId>(0),
            )
            .map_err(RepoError::from)
        })?;

        info!("event=item_insert module=repo status=ok item_id={id}");
        Ok(item.with_id(id))
    }

    fn update(&self, item: &GroceryListItem) -> RepoResult<Option<GroceryListItem>> {
        let changed = self.db.with_connection(|conn| {
            conn.execute(
                "UPDATE GroceryListItem
                 SET
                    GroceryListId = ?1,
                    ProductId = ?2,
                    Amount = ?3
                 WHERE Id = ?4;",
                params![item.grocery_list_id, item.product_id, item.amount, item.id],
            )
            .map_err(RepoError::from)
        })?;

        if changed == 0 {
            return Ok(None);
        }

        info!("event=item_update module=repo status=ok item_id={}", item.id);
        Ok(Some(*item))
    }

    fn delete(&self, item: &GroceryListItem) -> RepoResult<Option<GroceryListItem>> {
        let changed = self.db.with_connection(|conn| {
            conn.execute("DELETE FROM GroceryListItem WHERE Id = ?1;", [item.id])
                .map_err(RepoError::from)
        })?;

        if changed == 0 {
            return Ok(None);
        }

        info!("event=item_delete module=repo status=ok item_id={}", item.id);
        Ok(Some(*item))
    }
}

fn query_items(
    conn: &Connection,
    sql: &str,
    params: impl Params,
) -> RepoResult<Vec<GroceryListItem>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();

    while let Some(row) = rows.next()? {
        items.push(parse_item_row(row)?);
    }

    Ok(items)
}

fn parse_item_row(row: &Row<'_>) -> rusqlite::Result<GroceryListItem> {
    Ok(GroceryListItem {
        id: row.get("Id")?,
        grocery_list_id: row.get("GroceryListId")?,
        product_id: row.get("ProductId")?,
        amount: row.get("Amount")?,
    })
}
