use chrono::NaiveDate;
use grocery_core::{
    Database, DbError, NewProduct, Product, ProductField, ProductId, ProductRepository,
    ProductService, ProductServiceError, RepoError, RepoResult, SqliteProductRepository,
};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;
use tempfile::TempDir;

fn seeded_service() -> (TempDir, Database, ProductService<SqliteProductRepository>) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("grocery.sqlite3"));
    let repo = SqliteProductRepository::try_new(db.clone()).unwrap();
    (dir, db, ProductService::new(repo))
}

fn price(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

/// Repository whose reads never see existing rows, so the service's
/// name pre-check always passes and only the store can catch duplicates.
struct StaleReadRepository(SqliteProductRepository);

impl ProductRepository for StaleReadRepository {
    fn get_all(&self) -> RepoResult<Vec<Product>> {
        Ok(Vec::new())
    }

    fn get(&self, id: ProductId) -> RepoResult<Option<Product>> {
        self.0.get(id)
    }

    fn add(&self, product: &NewProduct) -> RepoResult<Product> {
        self.0.add(product)
    }

    fn update(&self, product: &Product) -> RepoResult<Option<Product>> {
        self.0.update(product)
    }

    fn delete(&self, product: &Product) -> RepoResult<Option<Product>> {
        self.0.delete(product)
    }
}

#[test]
fn add_valid_products_assigns_new_positive_ids() {
    let (_dir, _db, service) = seeded_service();
    let existing: HashSet<_> = service
        .get_all()
        .unwrap()
        .into_iter()
        .map(|product| product.id)
        .collect();

    let first = service
        .add(&NewProduct::new("Appels", 10, price("2.99")))
        .unwrap();
    let second = service
        .add(
            &NewProduct::new("Peren", 0, Decimal::ZERO)
                .with_shelf_life(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()),
        )
        .unwrap();

    for created in [&first, &second] {
        assert!(created.id > 0);
        assert!(!existing.contains(&created.id));
    }
    assert_ne!(first.id, second.id);
    assert_eq!(service.get_all().unwrap().len(), existing.len() + 2);
}

#[test]
fn negative_stock_or_price_is_rejected_without_writing() {
    let (_dir, _db, service) = seeded_service();
    let count = service.get_all().unwrap().len();

    let stock_err = service
        .add(&NewProduct::new("Appels", -1, price("2.99")))
        .unwrap_err();
    assert!(matches!(
        stock_err,
        ProductServiceError::OutOfRange {
            field: ProductField::Stock,
            ..
        }
    ));

    let price_err = service
        .add(&NewProduct::new("Appels", 1, price("-0.01")))
        .unwrap_err();
    assert!(matches!(
        price_err,
        ProductServiceError::OutOfRange {
            field: ProductField::Price,
            ..
        }
    ));

    assert_eq!(service.get_all().unwrap().len(), count);
}

#[test]
fn blank_name_is_rejected_as_invalid_argument() {
    let (_dir, _db, service) = seeded_service();

    for name in ["", "   ", "\t\n"] {
        let err = service
            .add(&NewProduct::new(name, 1, Decimal::ONE))
            .unwrap_err();
        assert!(matches!(
            err,
            ProductServiceError::InvalidArgument {
                field: ProductField::Name,
                ..
            }
        ));
        assert_eq!(err.to_string(), "product name is required");
    }
}

#[test]
fn duplicate_name_is_a_conflict_regardless_of_case_and_whitespace() {
    let (_dir, _db, service) = seeded_service();

    service
        .add(&NewProduct::new("milk", 5, price("1.10")))
        .unwrap();
    let count = service.get_all().unwrap().len();

    let err = service
        .add(&NewProduct::new(" Milk ", 5, price("1.10")))
        .unwrap_err();
    match &err {
        ProductServiceError::Conflict { name } => assert_eq!(name, " Milk "),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!err.is_validation());
    assert_eq!(service.get_all().unwrap().len(), count);

    let seeded = service
        .add(&NewProduct::new("MELK", 1, Decimal::ONE))
        .unwrap_err();
    assert!(matches!(seeded, ProductServiceError::Conflict { .. }));
}

#[test]
fn duplicate_missed_by_stale_read_is_still_a_conflict() {
    let (_dir, db, _service) = seeded_service();
    let stale = ProductService::new(StaleReadRepository(
        SqliteProductRepository::try_new(db.clone()).unwrap(),
    ));

    let err = stale
        .add(&NewProduct::new("kaas ", 1, Decimal::ONE))
        .unwrap_err();
    assert!(matches!(err, ProductServiceError::Conflict { .. }));

    let fresh = SqliteProductRepository::try_new(db).unwrap();
    assert_eq!(fresh.get_all().unwrap().len(), 4);
}

#[test]
fn update_overwrites_existing_product() {
    let (_dir, db, service) = seeded_service();

    let changed = Product {
        id: 1,
        name: "Halfvolle melk".to_string(),
        stock: 250,
        shelf_life: NaiveDate::from_ymd_opt(2025, 10, 1),
        price: price("1.05"),
    };
    assert_eq!(service.update(&changed).unwrap(), Some(changed.clone()));

    let repo = SqliteProductRepository::try_new(db).unwrap();
    assert_eq!(repo.get(1).unwrap(), Some(changed));
}

#[test]
fn update_of_unknown_id_returns_none() {
    let (_dir, _db, service) = seeded_service();
    let before = service.get_all().unwrap();

    let ghost = NewProduct::new("Spook", 1, Decimal::ONE).with_id(404);
    assert!(service.update(&ghost).unwrap().is_none());
    assert_eq!(service.get_all().unwrap(), before);
}

#[test]
fn update_shares_field_validation_with_add() {
    let (_dir, _db, service) = seeded_service();
    let before = service.get_all().unwrap();

    let mut invalid = before[0].clone();
    invalid.stock = -5;
    assert!(matches!(
        service.update(&invalid).unwrap_err(),
        ProductServiceError::OutOfRange {
            field: ProductField::Stock,
            ..
        }
    ));

    let mut blank = before[0].clone();
    blank.name = " ".to_string();
    assert!(service.update(&blank).unwrap_err().is_validation());

    assert_eq!(service.get_all().unwrap(), before);
}

#[test]
fn update_keeping_own_name_is_allowed_but_taking_another_is_a_conflict() {
    let (_dir, _db, service) = seeded_service();
    let products = service.get_all().unwrap();

    let mut restocked = products[0].clone();
    restocked.stock += 1;
    restocked.name = restocked.name.to_uppercase();
    assert!(service.update(&restocked).unwrap().is_some());

    let mut renamed = products[1].clone();
    renamed.name = "brood".to_string();
    assert!(matches!(
        service.update(&renamed).unwrap_err(),
        ProductServiceError::Conflict { .. }
    ));
}

#[test]
fn update_onto_another_name_after_full_normalization_is_a_conflict() {
    let (_dir, _db, service) = seeded_service();
    let eclair = service
        .add(&NewProduct::new("Éclair", 6, price("1.75")))
        .unwrap();
    let before = service.get_all().unwrap();
    let kaas = before[1].clone();

    for name in ["melk\t", "\nBrood", "éclair", " ÉCLAIR\r\n"] {
        let mut renamed = kaas.clone();
        renamed.name = name.to_string();
        match service.update(&renamed).unwrap_err() {
            ProductServiceError::Conflict { name: rejected } => assert_eq!(rejected, name),
            other => panic!("unexpected error for {name:?}: {other}"),
        }
    }
    assert_eq!(service.get_all().unwrap(), before);

    let mut own = eclair.clone();
    own.name = "\téclair ".to_string();
    assert_eq!(service.update(&own).unwrap(), Some(own));
}

#[test]
fn price_beyond_store_precision_is_out_of_range() {
    let (_dir, _db, service) = seeded_service();
    let before = service.get_all().unwrap();

    let err = service
        .add(&NewProduct::new("Appels", 1, price("0.333333333333333333")))
        .unwrap_err();
    assert!(matches!(
        err,
        ProductServiceError::OutOfRange {
            field: ProductField::Price,
            ..
        }
    ));
    assert!(err.is_validation());

    let mut kaas = before[1].clone();
    kaas.price = price("7.980000000000000001");
    assert!(matches!(
        service.update(&kaas).unwrap_err(),
        ProductServiceError::OutOfRange {
            field: ProductField::Price,
            ..
        }
    ));

    assert_eq!(service.get_all().unwrap(), before);
}

#[test]
fn delete_and_get_are_not_implemented() {
    let (_dir, _db, service) = seeded_service();
    let existing = service.get_all().unwrap().remove(0);

    for err in [
        service.delete(&existing).unwrap_err(),
        service.get(existing.id).unwrap_err(),
        service.get(12345).unwrap_err(),
    ] {
        assert!(matches!(err, ProductServiceError::NotImplemented(_)));
        assert!(!err.is_validation());
    }

    assert_eq!(service.get_all().unwrap().len(), 4);
}

#[test]
fn store_failures_pass_through_unchanged() {
    let (_dir, db, service) = seeded_service();
    db.with_connection(|conn| conn.execute_batch("DROP TABLE Product;").map_err(DbError::from))
        .unwrap();

    let err = service.get_all().unwrap_err();
    assert!(matches!(
        err,
        ProductServiceError::Repo(RepoError::Db(DbError::Sqlite(_)))
    ));

    let add_err = service
        .add(&NewProduct::new("Appels", 1, Decimal::ONE))
        .unwrap_err();
    assert!(matches!(add_err, ProductServiceError::Repo(_)));
}

#[test]
fn products_serialize_with_string_price_and_iso_date() {
    let (_dir, _db, service) = seeded_service();
    let kaas = service.get_all().unwrap().remove(1);

    let json = serde_json::to_value(&kaas).unwrap();
    assert_eq!(json["name"], "Kaas");
    assert_eq!(json["price"], "7.98");
    assert_eq!(json["shelf_life"], "2025-09-30");

    let back: Product = serde_json::from_value(json).unwrap();
    assert_eq!(back, kaas);
}
