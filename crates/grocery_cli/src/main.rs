//! Grocery inventory command line entry point.
//!
//! # Responsibility
//! - Parse configuration from flags, environment and `.env`.
//! - Wire repositories and the product service to one database file.
//! - Print results as JSON on stdout.

mod access;
mod args;
mod form;

use access::{ensure_can_create_products, CallerRole};
use anyhow::{anyhow, Context, Result};
use args::{Cli, Command, ItemCmd, ProductCmd};
use clap::Parser;
use grocery_core::{
    default_log_level, init_logging, Database, GroceryListItemRepository, LoggingConfig,
    NewGroceryListItem, ProductService, SqliteGroceryListItemRepository,
    SqliteProductRepository,
};
use log::info;
use serde::Serialize;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let config = LoggingConfig::new(level, log_dir)?;
        init_logging(&config)?;
    }

    info!("event=cli_start module=cli status=ok version={}", grocery_core::core_version());
    dispatch(cli)
}

fn dispatch(cli: Cli) -> Result<()> {
    let db = Database::new(&cli.db);
    match cli.command {
        Command::Product { cmd } => run_product(&db, CallerRole::from_admin_flag(cli.admin), cmd),
        Command::Item { cmd } => run_item(&db, cmd),
    }
}

fn run_product(db: &Database, role: CallerRole, cmd: ProductCmd) -> Result<()> {
    let repo = SqliteProductRepository::try_new(db.clone())
        .context("failed to prepare the product table")?;
    let service = ProductService::new(repo);

    match cmd {
        ProductCmd::List => print_json(&service.get_all()?),
        ProductCmd::Add(raw) => {
            ensure_can_create_products(role)?;
            let product = form::parse_product_form(&raw)?;
            print_json(&service.add(&product)?)
        }
        ProductCmd::Update { id, form: raw } => {
            let product = form::parse_product_form(&raw)?.with_id(id);
            let updated = service
                .update(&product)?
                .ok_or_else(|| anyhow!("product {id} not found"))?;
            print_json(&updated)
        }
    }
}

fn run_item(db: &Database, cmd: ItemCmd) -> Result<()> {
    let repo = SqliteGroceryListItemRepository::try_new(db.clone())
        .context("failed to prepare the grocery list item table")?;

    match cmd {
        ItemCmd::List { list_id: None } => print_json(&repo.get_all()?),
        ItemCmd::List {
            list_id: Some(list_id),
        } => print_json(&repo.get_all_on_grocery_list_id(list_id)?),
        ItemCmd::Get { id } => {
            let item = repo
                .get(id)?
                .ok_or_else(|| anyhow!("grocery list item {id} not found"))?;
            print_json(&item)
        }
        ItemCmd::Add {
            list_id,
            product_id,
            amount,
        } => print_json(&repo.add(&NewGroceryListItem::new(list_id, product_id, amount))?),
        ItemCmd::Update {
            id,
            list_id,
            product_id,
            amount,
        } => {
            let item = NewGroceryListItem::new(list_id, product_id, amount).with_id(id);
            let updated = repo
                .update(&item)?
                .ok_or_else(|| anyhow!("grocery list item {id} not found"))?;
            print_json(&updated)
        }
        ItemCmd::Delete { id } => {
            let item = repo
                .get(id)?
                .ok_or_else(|| anyhow!("grocery list item {id} not found"))?;
            let deleted = repo
                .delete(&item)?
                .ok_or_else(|| anyhow!("grocery list item {id} not found"))?;
            print_json(&deleted)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
