use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductChanges,
};
use crate::domain::types::{
    CategoryId, ImageUrl, ProductId, ProductName, ProductPrice, TypeConstraintError,
};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub product_image: Option<String>,
    pub expiry_date: NaiveDateTime,
    pub category_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Product`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub product_image: Option<String>,
    pub expiry_date: NaiveDateTime,
    pub category_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Patch applied by product updates; `None` columns are skipped.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct ProductChangeset {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub product_image: Option<String>,
    pub category_id: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::parse(&product.id)?,
            name: ProductName::new(product.name)?,
            price: ProductPrice::new(product.price)?,
            product_image: product.product_image.map(ImageUrl::new).transpose()?,
            expiry_date: product.expiry_date,
            category_id: product
                .category_id
                .as_deref()
                .map(CategoryId::parse)
                .transpose()?,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl From<DomainNewProduct> for NewProduct {
    fn from(product: DomainNewProduct) -> Self {
        Self {
            id: product.id.to_db_string(),
            name: product.name.into_inner(),
            price: product.price.get(),
            product_image: product.product_image.map(ImageUrl::into_inner),
            expiry_date: product.expiry_date,
            category_id: product.category_id.map(CategoryId::to_db_string),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<&ProductChanges> for ProductChangeset {
    fn from(changes: &ProductChanges) -> Self {
        Self {
            name: changes.name.as_ref().map(|name| name.as_str().to_string()),
            price: changes.price.map(ProductPrice::get),
            product_image: changes
                .product_image
                .as_ref()
                .map(|url| url.as_str().to_string()),
            category_id: changes.category_id.map(CategoryId::to_db_string),
            updated_at: changes.updated_at,
        }
    }
}
