//! Command line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "grocery",
    version,
    about = "Inspect and edit the grocery inventory store"
)]
pub struct Cli {
    #[arg(
        long,
        env = "GROCERY_DB",
        default_value = "grocery.sqlite3",
        value_name = "PATH",
        global = true,
        help = "SQLite database file; created and seeded on first use"
    )]
    pub db: PathBuf,

    #[arg(
        long,
        env = "GROCERY_LOG_DIR",
        value_name = "DIR",
        global = true,
        help = "Absolute directory for rolling log files; logging is off when unset"
    )]
    pub log_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "GROCERY_LOG_LEVEL",
        value_name = "LEVEL",
        global = true,
        help = "trace|debug|info|warn|error (defaults by build mode)"
    )]
    pub log_level: Option<String>,

    #[arg(
        long,
        env = "GROCERY_ADMIN",
        default_value_t = false,
        global = true,
        help = "Act as an administrator (required to create products)"
    )]
    pub admin: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Product commands")]
    Product {
        #[command(subcommand)]
        cmd: ProductCmd,
    },
    #[command(about = "Grocery list item commands")]
    Item {
        #[command(subcommand)]
        cmd: ItemCmd,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProductCmd {
    #[command(about = "List all products")]
    List,
    #[command(about = "Create a product (administrators only)")]
    Add(ProductForm),
    #[command(about = "Replace every field of an existing product")]
    Update {
        #[arg(long, value_name = "ID")]
        id: i64,
        #[command(flatten)]
        form: ProductForm,
    },
}

/// Raw product form input; parsed by [`crate::form::parse_product_form`].
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    #[arg(long, value_name = "NAME")]
    pub name: String,

    #[arg(long, default_value = "0", value_name = "COUNT")]
    pub stock: String,

    #[arg(
        long,
        default_value = "0",
        value_name = "AMOUNT",
        help = "Decimal price; `.` or `,` as decimal separator"
    )]
    pub price: String,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Optional expiry date")]
    pub shelf_life: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ItemCmd {
    #[command(about = "List grocery list items, optionally for one list")]
    List {
        #[arg(long, value_name = "LIST_ID")]
        list_id: Option<i64>,
    },
    #[command(about = "Show one grocery list item")]
    Get {
        #[arg(value_name = "ID")]
        id: i64,
    },
    #[command(about = "Add a product to a grocery list")]
    Add {
        #[arg(long, value_name = "LIST_ID")]
        list_id: i64,
        #[arg(long, value_name = "PRODUCT_ID")]
        product_id: i64,
        #[arg(long, value_name = "COUNT")]
        amount: i64,
    },
    #[command(about = "Replace every field of a grocery list item")]
    Update {
        #[arg(long, value_name = "ID")]
        id: i64,
        #[arg(long, value_name = "LIST_ID")]
        list_id: i64,
        #[arg(long, value_name = "PRODUCT_ID")]
        product_id: i64,
        #[arg(long, value_name = "COUNT")]
        amount: i64,
    },
    #[command(about = "Delete a grocery list item")]
    Delete {
        #[arg(value_name = "ID")]
        id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, ItemCmd, ProductCmd};
    use clap::Parser;

    #[test]
    fn product_add_collects_form_fields() {
        let cli = Cli::try_parse_from([
            "grocery",
            "--admin",
            "product",
            "add",
            "--name",
            "Appels",
            "--stock",
            "12",
            "--price",
            "2,49",
            "--shelf-life",
            "2026-01-31",
        ])
        .unwrap();

        assert!(cli.admin);
        match cli.command {
            Command::Product {
                cmd: ProductCmd::Add(form),
            } => {
                assert_eq!(form.name, "Appels");
                assert_eq!(form.stock, "12");
                assert_eq!(form.price, "2,49");
                assert_eq!(form.shelf_life.as_deref(), Some("2026-01-31"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn item_list_accepts_optional_list_filter_and_global_db() {
        let cli =
            Cli::try_parse_from(["grocery", "item", "list", "--list-id", "1", "--db", "x.db"])
                .unwrap();

        assert_eq!(cli.db, std::path::PathBuf::from("x.db"));
        assert!(matches!(
            cli.command,
            Command::Item {
                cmd: ItemCmd::List { list_id: Some(1) }
            }
        ));
    }

    #[test]
    fn product_update_requires_id() {
        assert!(Cli::try_parse_from(["grocery", "product", "update", "--name", "x"]).is_err());
    }
}
