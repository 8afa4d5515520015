//! Product use-case service.
//!
//! # Responsibility
//! - Enforce product invariants before any write reaches the repository.
//! - Report validation, conflict and unsupported-operation failures as
//!   distinct error kinds.
//!
//! # Invariants
//! - Names are non-blank; stock and price are non-negative.
//! - No two products share a normalized name. `add` and `update` both check
//!   the current product set first; `update` skips the row being replaced.
//!   The store's unique index backs this up for racing writers, and a unique
//!   violation from a write is reported as [`ProductServiceError::Conflict`].
//! - Prices the store cannot hold exactly are `OutOfRange` on `price`.
//! - Store errors other than unique violations pass through unchanged.
//!
//! # See also
//! - `repo::product_repo` for column encoding.

use crate::model::product::{normalize_product_name, NewProduct, Product, ProductId};
use crate::repo::product_repo::ProductRepository;
use crate::repo::RepoError;
use log::{info, warn};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Product fields that validation can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Stock,
    Price,
}

impl ProductField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Stock => "stock",
            Self::Price => "price",
        }
    }
}

/// Service error for product use-cases.
#[derive(Debug)]
pub enum ProductServiceError {
    /// A required field is missing or blank.
    InvalidArgument {
        field: ProductField,
        message: &'static str,
    },
    /// A numeric field is outside its allowed range.
    OutOfRange {
        field: ProductField,
        message: &'static str,
    },
    /// Another product already uses this name.
    Conflict { name: String },
    /// The operation is intentionally not offered by this service.
    NotImplemented(&'static str),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ProductServiceError {
    /// Returns whether the caller can fix this failure by changing its input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::OutOfRange { .. })
    }
}

impl Display for ProductServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { message, .. } | Self::OutOfRange { message, .. } => {
                write!(f, "{message}")
            }
            Self::Conflict { name } => {
                write!(f, "a product with the name '{name}' already exists")
            }
            Self::NotImplemented(operation) => {
                write!(f, "product operation `{operation}` is not implemented")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProductServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProductServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type ProductServiceResult<T> = Result<T, ProductServiceError>;

/// Product service facade over repository implementations.
///
/// Holds no state besides the repository; every call re-reads the store.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all products.
    pub fn get_all(&self) -> ProductServiceResult<Vec<Product>> {
        Ok(self.repo.get_all()?)
    }

    /// Validates and persists a new product.
    ///
    /// # Errors
    /// - `InvalidArgument` when the name is blank.
    /// - `OutOfRange` when stock or price is negative, or the price carries
    ///   more precision than the store keeps.
    /// - `Conflict` when the normalized name is already taken, whether seen by
    ///   the pre-check or by the store's unique index.
    pub fn add(&self, product: &NewProduct) -> ProductServiceResult<Product> {
        let checked = validate_fields(&product.name, product.stock, product.price)
            .and_then(|()| self.ensure_name_available(&product.name, None));
        if let Err(err) = checked {
            log_rejection("product_add", &err);
            return Err(err);
        }

        let created = self
            .repo
            .add(product)
            .map_err(|err| translate_write_error(err, &product.name))
            .inspect_err(|err| log_rejection("product_add", err))?;

        info!(
            "event=product_add module=service status=ok product_id={}",
            created.id
        );
        Ok(created)
    }

    /// Replaces a stored product by id.
    ///
    /// Applies the same field validation as [`ProductService::add`]. Returns
    /// `Ok(None)` when no product has `product.id`. Renaming onto another
    /// product's normalized name fails with `Conflict`; keeping its own name
    /// in any casing or padding is allowed.
    pub fn update(&self, product: &Product) -> ProductServiceResult<Option<Product>> {
        let checked = validate_fields(&product.name, product.stock, product.price)
            .and_then(|()| self.ensure_name_available(&product.name, Some(product.id)));
        if let Err(err) = checked {
            log_rejection("product_update", &err);
            return Err(err);
        }

        let updated = self
            .repo
            .update(product)
            .map_err(|err| translate_write_error(err, &product.name))
            .inspect_err(|err| log_rejection("product_update", err))?;

        if updated.is_none() {
            info!(
                "event=product_update module=service status=not_found product_id={}",
                product.id
            );
        }
        Ok(updated)
    }

    /// Not offered by this service.
    pub fn delete(&self, _product: &Product) -> ProductServiceResult<Option<Product>> {
        Err(ProductServiceError::NotImplemented("delete"))
    }

    /// Not offered by this service.
    pub fn get(&self, _id: ProductId) -> ProductServiceResult<Option<Product>> {
        Err(ProductServiceError::NotImplemented("get"))
    }

    // Reads the full product set on every call. Writes racing past this check
    // still hit the unique index.
    fn ensure_name_available(
        &self,
        name: &str,
        replacing: Option<ProductId>,
    ) -> ProductServiceResult<()> {
        let wanted = normalize_product_name(name);
        let taken = self
            .repo
            .get_all()?
            .iter()
            .filter(|existing| Some(existing.id) != replacing)
            .any(|existing| existing.normalized_name() == wanted);

        if taken {
            return Err(ProductServiceError::Conflict {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

fn validate_fields(name: &str, stock: i64, price: Decimal) -> ProductServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ProductServiceError::InvalidArgument {
            field: ProductField::Name,
            message: "product name is required",
        });
    }
    if stock < 0 {
        return Err(ProductServiceError::OutOfRange {
            field: ProductField::Stock,
            message: "stock cannot be negative",
        });
    }
    if price < Decimal::ZERO {
        return Err(ProductServiceError::OutOfRange {
            field: ProductField::Price,
            message: "price cannot be negative",
        });
    }
    Ok(())
}

fn translate_write_error(err: RepoError, name: &str) -> ProductServiceError {
    if let RepoError::UnstorablePrice(_) = err {
        return ProductServiceError::OutOfRange {
            field: ProductField::Price,
            message: "price has more precision than the store keeps",
        };
    }
    if err.is_unique_violation() {
        return ProductServiceError::Conflict {
            name: name.to_string(),
        };
    }
    ProductServiceError::Repo(err)
}

fn log_rejection(event: &str, err: &ProductServiceError) {
    let reason = match err {
        ProductServiceError::InvalidArgument { field, .. } => format!("invalid_{}", field.as_str()),
        ProductServiceError::OutOfRange { field, .. } => {
            format!("out_of_range_{}", field.as_str())
        }
        ProductServiceError::Conflict { .. } => "duplicate_name".to_string(),
        ProductServiceError::NotImplemented(_) => "not_implemented".to_string(),
        ProductServiceError::Repo(_) => "store_error".to_string(),
    };
    warn!("event={event} module=service status=rejected reason={reason}");
}

#[cfg(test)]
mod tests {
    use super::{validate_fields, ProductField, ProductServiceError};
    use rust_decimal::Decimal;

    #[test]
    fn blank_name_is_invalid_argument() {
        let err = validate_fields(" \t", 1, Decimal::ONE).unwrap_err();
        assert!(matches!(
            err,
            ProductServiceError::InvalidArgument {
                field: ProductField::Name,
                ..
            }
        ));
        assert!(err.is_validation());
    }

    #[test]
    fn negative_numbers_are_out_of_range() {
        let stock = validate_fields("Melk", -1, Decimal::ONE).unwrap_err();
        assert!(matches!(
            stock,
            ProductServiceError::OutOfRange {
                field: ProductField::Stock,
                ..
            }
        ));

        let price = validate_fields("Melk", 1, Decimal::new(-1, 2)).unwrap_err();
        assert!(matches!(
            price,
            ProductServiceError::OutOfRange {
                field: ProductField::Price,
                ..
            }
        ));
    }

    #[test]
    fn zero_values_and_negative_zero_price_are_accepted() {
        validate_fields("Cornflakes", 0, Decimal::ZERO).unwrap();
        validate_fields("Cornflakes", 0, -Decimal::ZERO).unwrap();
    }

    #[test]
    fn not_implemented_is_not_a_validation_failure() {
        let err = ProductServiceError::NotImplemented("get");
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "product operation `get` is not implemented");
    }
}
