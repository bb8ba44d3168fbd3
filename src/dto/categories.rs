use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::category::{Category, CategoryWithProducts};
use crate::dto::products::ProductDto;
use crate::dto::utc;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.into_inner(),
            created_at: utc(value.created_at),
            updated_at: utc(value.updated_at),
        }
    }
}

/// A category with the products that reference it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithProductsDto {
    #[serde(flatten)]
    pub category: CategoryDto,
    pub products: Vec<ProductDto>,
}

impl From<CategoryWithProducts> for CategoryWithProductsDto {
    fn from(value: CategoryWithProducts) -> Self {
        Self {
            category: value.category.into(),
            products: value.products.into_iter().map(Into::into).collect(),
        }
    }
}
