use std::thread;

use chrono::{DateTime, NaiveDateTime};
use pushkind_catalog::domain::category::NewCategory;
use pushkind_catalog::domain::product::{NewProduct, ProductChanges};
use pushkind_catalog::domain::types::{
    CategoryId, CategoryName, ImageUrl, ProductId, ProductName, ProductPrice,
};
use pushkind_catalog::repository::{
    CategoryReader, CategoryWriter, DieselRepository, ProductReader, ProductWriter,
};

mod common;

fn at(seconds: i64) -> NaiveDateTime {
    DateTime::from_timestamp(seconds, 0)
        .expect("valid timestamp")
        .naive_utc()
}

fn new_category(name: &str, created: i64) -> NewCategory {
    NewCategory {
        id: CategoryId::generate(),
        name: CategoryName::new(name).expect("valid category name"),
        created_at: at(created),
        updated_at: at(created),
    }
}

fn new_product(name: &str, created: i64, category_id: Option<CategoryId>) -> NewProduct {
    NewProduct {
        id: ProductId::generate(),
        name: ProductName::new(name).expect("valid product name"),
        price: ProductPrice::new(12.5).expect("valid price"),
        product_image: None,
        expiry_date: at(created),
        category_id,
        created_at: at(created),
        updated_at: at(created),
    }
}

#[test]
fn category_crud_round_trip() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_category(&new_category("Beverages", 100))
        .expect("should create category");
    assert_eq!(created.name, "Beverages");

    let fetched = repo
        .get_category_by_id(created.id)
        .expect("should query category")
        .expect("category should exist");
    assert_eq!(fetched, created);

    let renamed = CategoryName::new("Drinks").expect("valid category name");
    let affected = repo
        .update_category(created.id, &renamed, at(200))
        .expect("should update category");
    assert_eq!(affected, 1);

    let fetched = repo
        .get_category_by_id(created.id)
        .expect("should query category")
        .expect("category should exist");
    assert_eq!(fetched.name, "Drinks");
    assert_eq!(fetched.created_at, at(100));
    assert_eq!(fetched.updated_at, at(200));

    assert_eq!(repo.delete_category(created.id).unwrap(), 1);
    assert_eq!(repo.delete_category(created.id).unwrap(), 0);
    assert!(repo.get_category_by_id(created.id).unwrap().is_none());
}

#[test]
fn update_of_unknown_category_affects_nothing() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let name = CategoryName::new("X").expect("valid category name");
    let affected = repo
        .update_category(CategoryId::generate(), &name, at(0))
        .expect("should run update");

    assert_eq!(affected, 0);
}

#[test]
fn lists_are_newest_first() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    for (name, created) in [("Middle", 200), ("Oldest", 100), ("Newest", 300)] {
        repo.create_category(&new_category(name, created))
            .expect("should create category");
        repo.create_product(&new_product(name, created, None))
            .expect("should create product");
    }

    let category_names: Vec<_> = repo
        .list_categories()
        .expect("should list categories")
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect();
    assert_eq!(category_names, ["Newest", "Middle", "Oldest"]);

    let product_names: Vec<_> = repo
        .list_products()
        .expect("should list products")
        .into_iter()
        .map(|p| p.name.into_inner())
        .collect();
    assert_eq!(product_names, ["Newest", "Middle", "Oldest"]);
}

#[test]
fn category_with_products_only_includes_its_own() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let tea = repo.create_category(&new_category("Tea", 0)).unwrap();
    let coffee = repo.create_category(&new_category("Coffee", 0)).unwrap();
    let sencha = repo
        .create_product(&new_product("sencha", 10, Some(tea.id)))
        .unwrap();
    repo.create_product(&new_product("espresso", 10, Some(coffee.id)))
        .unwrap();
    repo.create_product(&new_product("loose", 10, None)).unwrap();

    let with_products = repo
        .get_category_with_products(tea.id)
        .expect("should query category")
        .expect("category should exist");

    assert_eq!(with_products.category, tea);
    assert_eq!(with_products.products, vec![sencha]);
    assert!(
        repo.get_category_with_products(CategoryId::generate())
            .unwrap()
            .is_none()
    );
}

#[test]
fn partial_product_update_keeps_untouched_fields() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut product = new_product("widget", 0, None);
    product.product_image = Some(ImageUrl::new("https://cdn.example.com/a.png").unwrap());
    let created = repo.create_product(&product).expect("should create product");

    let changes = ProductChanges {
        name: Some(ProductName::new("Gadget").unwrap()),
        price: None,
        product_image: None,
        category_id: None,
        updated_at: at(50),
    };
    assert_eq!(repo.update_product(created.id, &changes).unwrap(), 1);

    let stored = repo
        .get_product_by_id(created.id)
        .unwrap()
        .expect("product should exist");
    assert_eq!(stored.name, "Gadget");
    assert_eq!(stored.price, 12.5);
    assert_eq!(stored.product_image, created.product_image);
    assert_eq!(stored.updated_at, at(50));

    assert_eq!(repo.update_product(ProductId::generate(), &changes).unwrap(), 0);
}

#[test]
fn deleting_category_leaves_products() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let tea = repo.create_category(&new_category("Tea", 0)).unwrap();
    let sencha = repo
        .create_product(&new_product("sencha", 0, Some(tea.id)))
        .unwrap();

    assert_eq!(repo.delete_category(tea.id).unwrap(), 1);

    let remaining = repo
        .get_product_by_id(sencha.id)
        .unwrap()
        .expect("product should remain after category deletion");
    assert_eq!(remaining.category_id, Some(tea.id));
}

#[test]
fn delete_product_twice() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo.create_product(&new_product("widget", 0, None)).unwrap();

    assert_eq!(repo.delete_product(created.id).unwrap(), 1);
    assert_eq!(repo.delete_product(created.id).unwrap(), 0);
}

#[test]
fn concurrent_writers_share_one_pool() {
    const THREADS: usize = 8;
    const WRITES: usize = 25;

    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let repo = repo.clone();
            thread::spawn(move || {
                for i in 0..WRITES {
                    let category = new_category(&format!("Category {t}-{i}"), i as i64);
                    repo.create_category(&category)
                        .expect("concurrent write should wait for the lock");
                    repo.create_product(&new_product("widget", i as i64, Some(category.id)))
                        .expect("concurrent write should wait for the lock");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    assert_eq!(repo.list_categories().unwrap().len(), THREADS * WRITES);
    assert_eq!(repo.list_products().unwrap().len(), THREADS * WRITES);
}
