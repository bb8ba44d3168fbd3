use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, ImageUrl, ProductId, ProductName, ProductPrice};

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub price: ProductPrice,
    /// Public URL returned by the object storage, if an image was uploaded.
    pub product_image: Option<ImageUrl>,
    /// Stamped once at creation.
    pub expiry_date: NaiveDateTime,
    pub category_id: Option<CategoryId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: ProductName,
    pub price: ProductPrice,
    pub product_image: Option<ImageUrl>,
    pub expiry_date: NaiveDateTime,
    pub category_id: Option<CategoryId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a [`Product`]. `None` leaves the stored value untouched.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ProductChanges {
    pub name: Option<ProductName>,
    pub price: Option<ProductPrice>,
    pub product_image: Option<ImageUrl>,
    pub category_id: Option<CategoryId>,
    pub updated_at: NaiveDateTime,
}

impl ProductChanges {
    /// Applies the changes to an in-memory copy of a product.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(url) = &self.product_image {
            product.product_image = Some(url.clone());
        }
        if let Some(category_id) = self.category_id {
            product.category_id = Some(category_id);
        }
        product.updated_at = self.updated_at;
    }
}
