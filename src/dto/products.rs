use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::product::Product;
use crate::dto::utc;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub product_image: Option<String>,
    pub expiry_date: DateTime<Utc>,
    pub category_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.into_inner(),
            price: value.price.get(),
            product_image: value.product_image.map(|url| url.into_inner()),
            expiry_date: utc(value.expiry_date),
            category_id: value.category_id.map(|id| id.to_string()),
            created_at: utc(value.created_at),
            updated_at: utc(value.updated_at),
        }
    }
}
