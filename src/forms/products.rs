use actix_multipart::form::{MultipartForm, bytes::Bytes as FileBytes, text::Text};
use actix_web::web::Bytes;
use chrono::Utc;

use crate::domain::product::{NewProduct, ProductChanges};
use crate::domain::types::{CategoryId, ImageUrl, ProductId, ProductName, ProductPrice};
use crate::forms::FormError;
use crate::forms::validation::{FieldRule, FieldSource, FieldViolation, validate};

pub const PRODUCT_NAME_REQUIRED: &str = "Nome é obrigatório";
pub const PRODUCT_NAME_EMPTY: &str = "Nome não pode estar vazio";
pub const PRODUCT_PRICE_NUMERIC: &str = "O preço deve ser numérico";
pub const PRODUCT_CATEGORY_INVALID: &str = "A categoria informada é inválida";

pub const CREATE_PRODUCT_RULES: &[FieldRule] = &[
    FieldRule::not_empty("name", PRODUCT_NAME_REQUIRED),
    FieldRule::numeric("price", PRODUCT_PRICE_NUMERIC),
    FieldRule::identifier("categoryId", PRODUCT_CATEGORY_INVALID).optional(),
];

/// Updates only check the fields that were submitted.
pub const UPDATE_PRODUCT_RULES: &[FieldRule] = &[
    FieldRule::not_empty("name", PRODUCT_NAME_EMPTY).optional(),
    FieldRule::numeric("price", PRODUCT_PRICE_NUMERIC).optional(),
    FieldRule::identifier("categoryId", PRODUCT_CATEGORY_INVALID).optional(),
];

/// `multipart/form-data` body of product create and update requests.
///
/// The image is buffered in memory; the overall size limit is set through
/// `MultipartFormConfig` when the application is built.
#[derive(MultipartForm)]
pub struct ProductMultipartForm {
    pub name: Option<Text<String>>,
    pub price: Option<Text<String>>,
    #[multipart(rename = "categoryId")]
    pub category_id: Option<Text<String>>,
    #[multipart(rename = "productImage")]
    pub product_image: Option<FileBytes>,
}

/// An uploaded file as handed to the ingestion adapter.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Bytes,
    /// Declared MIME type of the part, if any.
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

/// Text fields of a product request.
#[derive(Debug, Clone, Default)]
pub struct ProductFields {
    pub name: Option<String>,
    pub price: Option<String>,
    pub category_id: Option<String>,
}

impl ProductMultipartForm {
    /// Splits the request into text fields and the optional image.
    ///
    /// An empty file part (a file input left blank) counts as no file.
    pub fn into_parts(self) -> (ProductFields, Option<UploadedImage>) {
        let fields = ProductFields {
            name: self.name.map(Text::into_inner),
            price: self.price.map(Text::into_inner),
            category_id: self.category_id.map(Text::into_inner),
        };
        let image = self
            .product_image
            .filter(|file| !file.data.is_empty())
            .map(|file| UploadedImage {
                data: file.data,
                content_type: file.content_type.map(|mime| mime.essence_str().to_string()),
                file_name: file.file_name,
            });
        (fields, image)
    }
}

impl FieldSource for ProductFields {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "price" => self.price.as_deref(),
            "categoryId" => self.category_id.as_deref(),
            _ => None,
        }
    }
}

fn violation(path: &'static str, msg: &'static str) -> FormError {
    FormError(vec![FieldViolation { path, msg }])
}

fn check(rules: &[FieldRule], fields: &ProductFields) -> Result<(), FormError> {
    let violations = validate(rules, fields);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(FormError(violations))
    }
}

fn parse_category_id(value: Option<&str>) -> Result<Option<CategoryId>, FormError> {
    value
        .map(CategoryId::parse)
        .transpose()
        .map_err(|_| violation("categoryId", PRODUCT_CATEGORY_INVALID))
}

/// Validated payload of a product creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductPayload {
    pub name: ProductName,
    pub price: ProductPrice,
    pub category_id: Option<CategoryId>,
}

impl TryFrom<ProductFields> for CreateProductPayload {
    type Error = FormError;

    fn try_from(value: ProductFields) -> Result<Self, Self::Error> {
        check(CREATE_PRODUCT_RULES, &value)?;

        Ok(Self {
            name: ProductName::new(value.name.unwrap_or_default())
                .map_err(|_| violation("name", PRODUCT_NAME_REQUIRED))?,
            price: ProductPrice::parse(value.price.as_deref().unwrap_or_default())
                .map_err(|_| violation("price", PRODUCT_PRICE_NUMERIC))?,
            category_id: parse_category_id(value.category_id.as_deref())?,
        })
    }
}

impl CreateProductPayload {
    /// Builds the record to insert: fresh id, lower-cased name and an expiry
    /// date stamped to now.
    pub fn into_new_product(self, product_image: Option<ImageUrl>) -> NewProduct {
        let now = Utc::now().naive_utc();
        NewProduct {
            id: ProductId::generate(),
            name: self.name.to_lowercase(),
            price: self.price,
            product_image,
            expiry_date: now,
            category_id: self.category_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated payload of a product update. Absent fields stay untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateProductPayload {
    pub name: Option<ProductName>,
    pub price: Option<ProductPrice>,
    pub category_id: Option<CategoryId>,
}

impl TryFrom<ProductFields> for UpdateProductPayload {
    type Error = FormError;

    fn try_from(value: ProductFields) -> Result<Self, Self::Error> {
        check(UPDATE_PRODUCT_RULES, &value)?;

        Ok(Self {
            name: value
                .name
                .map(ProductName::new)
                .transpose()
                .map_err(|_| violation("name", PRODUCT_NAME_EMPTY))?,
            price: value
                .price
                .as_deref()
                .map(ProductPrice::parse)
                .transpose()
                .map_err(|_| violation("price", PRODUCT_PRICE_NUMERIC))?,
            category_id: parse_category_id(value.category_id.as_deref())?,
        })
    }
}

impl UpdateProductPayload {
    /// The name is stored as submitted; only creation lower-cases it.
    pub fn into_changes(self, product_image: Option<ImageUrl>) -> ProductChanges {
        ProductChanges {
            name: self.name,
            price: self.price,
            product_image,
            category_id: self.category_id,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: Option<&str>, price: Option<&str>) -> ProductFields {
        ProductFields {
            name: name.map(str::to_string),
            price: price.map(str::to_string),
            category_id: None,
        }
    }

    #[test]
    fn create_lowercases_name_and_stamps_expiry() {
        let payload = CreateProductPayload::try_from(fields(Some("Widget"), Some("9.90"))).unwrap();
        let product = payload.into_new_product(None);

        assert_eq!(product.name, "widget");
        assert_eq!(product.price, 9.9);
        assert_eq!(product.expiry_date, product.created_at);
        assert!(product.product_image.is_none());
    }

    #[test]
    fn create_reports_all_violations() {
        let err = CreateProductPayload::try_from(fields(None, Some("abc"))).unwrap_err();
        let messages: Vec<_> = err.0.iter().map(|v| v.msg).collect();
        assert_eq!(messages, vec![PRODUCT_NAME_REQUIRED, PRODUCT_PRICE_NUMERIC]);
    }

    #[test]
    fn create_rejects_malformed_category_id() {
        let mut input = fields(Some("Widget"), Some("1"));
        input.category_id = Some("7".to_string());
        let err = CreateProductPayload::try_from(input).unwrap_err();
        assert_eq!(err.0[0].path, "categoryId");
    }

    #[test]
    fn update_accepts_empty_payload() {
        let payload = UpdateProductPayload::try_from(ProductFields::default()).unwrap();
        assert_eq!(payload, UpdateProductPayload::default());
    }

    #[test]
    fn update_checks_present_fields() {
        let err = UpdateProductPayload::try_from(fields(Some(""), Some("x"))).unwrap_err();
        let messages: Vec<_> = err.0.iter().map(|v| v.msg).collect();
        assert_eq!(messages, vec![PRODUCT_NAME_EMPTY, PRODUCT_PRICE_NUMERIC]);
    }

    #[test]
    fn update_keeps_name_case() {
        let payload = UpdateProductPayload::try_from(fields(Some("Gadget"), None)).unwrap();
        let changes = payload.into_changes(None);
        assert_eq!(changes.name.unwrap(), "Gadget");
        assert!(changes.price.is_none());
    }
}
