//! Binary ingestion: turns an optional uploaded image into a stored URL.

use crate::domain::types::ImageUrl;
use crate::forms::products::UploadedImage;
use crate::storage::ObjectStorage;

use super::{ServiceError, ServiceResult};

/// MIME types accepted for product images.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

pub const UNSUPPORTED_IMAGE_TYPE: &str =
    "Formato de arquivo não suportado. Apenas JPG e PNG são aceitos.";

/// Returns the declared MIME type when it is on the allow-list.
pub fn accepted_content_type(image: &UploadedImage) -> ServiceResult<&str> {
    match image.content_type.as_deref() {
        Some(content_type) if ALLOWED_IMAGE_TYPES.contains(&content_type) => Ok(content_type),
        other => {
            log::warn!(
                "Rejected upload {:?} with content type {other:?}",
                image.file_name
            );
            Err(ServiceError::UnsupportedMedia(UNSUPPORTED_IMAGE_TYPE))
        }
    }
}

/// Uploads `image` to the object storage and returns its public URL.
///
/// No image yields `Ok(None)`. Storage failures abort the pipeline instead
/// of continuing without an image.
pub async fn ingest_image<S>(
    image: Option<&UploadedImage>,
    storage: &S,
) -> ServiceResult<Option<ImageUrl>>
where
    S: ObjectStorage + ?Sized,
{
    let Some(image) = image else {
        return Ok(None);
    };

    let content_type = accepted_content_type(image)?;

    let url = storage
        .upload(image.data.clone(), content_type)
        .await
        .map_err(|e| {
            log::error!("Failed to upload product image: {e}");
            ServiceError::from(e)
        })?;

    match ImageUrl::new(url) {
        Ok(url) => Ok(Some(url)),
        Err(e) => {
            log::error!("Object storage returned an unusable URL: {e}");
            Err(ServiceError::Dependency(e.to_string()))
        }
    }
}
