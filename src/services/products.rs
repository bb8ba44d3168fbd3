use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::forms::products::{
    CreateProductPayload, ProductFields, UpdateProductPayload, UploadedImage,
};
use crate::repository::{ProductReader, ProductWriter};
use crate::storage::ObjectStorage;

use super::upload::ingest_image;
use super::{ServiceError, ServiceResult};

pub const PRODUCT_NOT_FOUND: &str = "Produto não encontrado";

fn parse_product_id(id: &str) -> ServiceResult<ProductId> {
    ProductId::parse(id).map_err(|_| ServiceError::NotFound(PRODUCT_NOT_FOUND))
}

/// Lists every product, newest first.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    repo.list_products().map_err(|e| {
        log::error!("Failed to list products: {e}");
        e.into()
    })
}

pub fn get_product<R>(id: &str, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    let id = parse_product_id(id)?;

    match repo.get_product_by_id(id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound(PRODUCT_NOT_FOUND)),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            Err(e.into())
        }
    }
}

/// Creates a product from a multipart request.
///
/// The image is ingested before the text fields are validated, so a rejected
/// file type wins over field errors. The stored name is lower-cased.
pub async fn create_product<R, S>(
    fields: ProductFields,
    image: Option<UploadedImage>,
    repo: &R,
    storage: &S,
) -> ServiceResult<Product>
where
    R: ProductWriter,
    S: ObjectStorage + ?Sized,
{
    let product_image = ingest_image(image.as_ref(), storage).await?;
    let payload = CreateProductPayload::try_from(fields)?;

    repo.create_product(&payload.into_new_product(product_image))
        .map_err(|e| {
            log::error!("Failed to create product: {e}");
            e.into()
        })
}

/// Applies a partial update. Fields left out of the request, including the
/// image, keep their stored values.
pub async fn update_product<R, S>(
    id: &str,
    fields: ProductFields,
    image: Option<UploadedImage>,
    repo: &R,
    storage: &S,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter,
    S: ObjectStorage + ?Sized,
{
    let product_image = ingest_image(image.as_ref(), storage).await?;
    let payload = UpdateProductPayload::try_from(fields)?;
    let id = parse_product_id(id)?;

    let mut product = match repo.get_product_by_id(id) {
        Ok(Some(product)) => product,
        Ok(None) => return Err(ServiceError::NotFound(PRODUCT_NOT_FOUND)),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            return Err(e.into());
        }
    };

    let changes = payload.into_changes(product_image);
    match repo.update_product(id, &changes) {
        Ok(0) => return Err(ServiceError::NotFound(PRODUCT_NOT_FOUND)),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to update product: {e}");
            return Err(e.into());
        }
    }

    changes.apply_to(&mut product);
    Ok(product)
}

pub fn delete_product<R>(id: &str, repo: &R) -> ServiceResult<()>
where
    R: ProductWriter,
{
    let id = parse_product_id(id)?;

    match repo.delete_product(id) {
        Ok(0) => Err(ServiceError::NotFound(PRODUCT_NOT_FOUND)),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete product: {e}");
            Err(e.into())
        }
    }
}
