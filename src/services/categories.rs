use chrono::Utc;

use crate::domain::category::{Category, CategoryWithProducts};
use crate::domain::types::CategoryId;
use crate::forms::categories::{CategoryForm, CategoryFormPayload};
use crate::notifications::{Mailer, Notification};
use crate::repository::{CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

pub const CATEGORY_NOT_FOUND: &str = "Categoria não encontrada";

/// Malformed ids are reported exactly like absent ones.
fn parse_category_id(id: &str) -> ServiceResult<CategoryId> {
    CategoryId::parse(id).map_err(|_| ServiceError::NotFound(CATEGORY_NOT_FOUND))
}

async fn notify<M>(mailer: &M, notification: Notification) -> ServiceResult<()>
where
    M: Mailer + ?Sized,
{
    mailer.send(&notification).await.map_err(|e| {
        log::error!("Failed to send notification '{}': {e}", notification.subject);
        ServiceError::from(e)
    })
}

/// Lists every category, newest first.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        e.into()
    })
}

pub fn get_category<R>(id: &str, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    let id = parse_category_id(id)?;

    match repo.get_category_by_id(id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(e.into())
        }
    }
}

/// Validates and stores a new category, then sends the "created" email.
///
/// A failed email is reported as a failure of the whole request even though
/// the category has already been stored.
pub async fn create_category<R, M>(
    form: CategoryForm,
    repo: &R,
    mailer: &M,
) -> ServiceResult<Category>
where
    R: CategoryWriter,
    M: Mailer + ?Sized,
{
    let payload = CategoryFormPayload::try_from(form)?;

    let category = repo
        .create_category(&payload.into_new_category())
        .map_err(|e| {
            log::error!("Failed to create category: {e}");
            ServiceError::from(e)
        })?;

    notify(mailer, Notification::category_created(&category)).await?;

    Ok(category)
}

/// Renames a category and sends the "updated" email.
///
/// The name is required here just as on creation. The returned record
/// includes the category's products.
pub async fn update_category<R, M>(
    id: &str,
    form: CategoryForm,
    repo: &R,
    mailer: &M,
) -> ServiceResult<CategoryWithProducts>
where
    R: CategoryReader + CategoryWriter,
    M: Mailer + ?Sized,
{
    let payload = CategoryFormPayload::try_from(form)?;
    let id = parse_category_id(id)?;

    let affected = repo
        .update_category(id, &payload.name, Utc::now().naive_utc())
        .map_err(|e| {
            log::error!("Failed to update category: {e}");
            ServiceError::from(e)
        })?;
    if affected == 0 {
        return Err(ServiceError::NotFound(CATEGORY_NOT_FOUND));
    }

    let updated = match repo.get_category_with_products(id) {
        Ok(Some(updated)) => updated,
        Ok(None) => return Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
        Err(e) => {
            log::error!("Failed to reload category: {e}");
            return Err(e.into());
        }
    };

    notify(mailer, Notification::category_updated(&updated.category)).await?;

    Ok(updated)
}

/// Deletes a category. Products pointing at it are left in place.
pub fn delete_category<R>(id: &str, repo: &R) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    let id = parse_category_id(id)?;

    match repo.delete_category(id) {
        Ok(0) => Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(e.into())
        }
    }
}
