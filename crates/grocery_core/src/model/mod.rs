//! Inventory domain model.
//!
//! # Responsibility
//! - Define the passive records moved between callers, services and storage.
//!
//! # Invariants
//! - `New*` values carry no identity; they describe a row not yet persisted.
//! - Values carrying an id were produced by the store: the id is always the
//!   primary key assigned on insert.

pub mod grocery_list_item;
pub mod product;
