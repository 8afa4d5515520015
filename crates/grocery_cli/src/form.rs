//! Product form parsing.
//!
//! Turns raw text input into a [`NewProduct`] before the service is called.
//! Range and uniqueness rules stay in the service; this layer only rejects
//! text that does not parse and negative numbers, with form-level messages.

use crate::args::ProductForm;
use chrono::NaiveDate;
use grocery_core::NewProduct;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    NameRequired,
    InvalidStock(String),
    InvalidPrice(String),
    InvalidShelfLife(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "name is required"),
            Self::InvalidStock(value) => {
                write!(f, "stock must be a non-negative whole number, got `{value}`")
            }
            Self::InvalidPrice(value) => {
                write!(f, "price must be a non-negative number, got `{value}`")
            }
            Self::InvalidShelfLife(value) => {
                write!(f, "shelf life must be a YYYY-MM-DD date, got `{value}`")
            }
        }
    }
}

impl Error for FormError {}

pub fn parse_product_form(form: &ProductForm) -> Result<NewProduct, FormError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(FormError::NameRequired);
    }

    let stock = parse_stock(&form.stock)?;
    let price = parse_price(&form.price)?;
    let mut product = NewProduct::new(name, stock, price);
    if let Some(value) = form.shelf_life.as_deref() {
        product = product.with_shelf_life(parse_shelf_life(value)?);
    }
    Ok(product)
}

fn parse_stock(value: &str) -> Result<i64, FormError> {
    match value.trim().parse::<i64>() {
        Ok(stock) if stock >= 0 => Ok(stock),
        _ => Err(FormError::InvalidStock(value.to_string())),
    }
}

/// Accepts `.` or `,` as decimal separator. A comma is only treated as the
/// separator when no `.` is present.
fn parse_price(value: &str) -> Result<Decimal, FormError> {
    let trimmed = value.trim();
    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replace(',', ".")
    };

    match Decimal::from_str(&normalized) {
        Ok(price) if price >= Decimal::ZERO => Ok(price),
        _ => Err(FormError::InvalidPrice(value.to_string())),
    }
}

fn parse_shelf_life(value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| FormError::InvalidShelfLife(value.to_string()))
}
