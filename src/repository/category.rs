use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{Category, CategoryWithProducts, NewCategory};
use crate::domain::product::Product;
use crate::domain::types::{CategoryId, CategoryName};
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::models::product::Product as DbProduct;
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository, RepositoryResult};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order((categories::created_at.desc(), categories::id.desc()))
            .select(DbCategory::as_select())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.to_db_string()))
            .select(DbCategory::as_select())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn get_category_with_products(
        &self,
        id: CategoryId,
    ) -> RepositoryResult<Option<CategoryWithProducts>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let Some(category) = categories::table
            .filter(categories::id.eq(id.to_db_string()))
            .select(DbCategory::as_select())
            .first::<DbCategory>(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        let products = products::table
            .filter(products::category_id.eq(Some(id.to_db_string())))
            .order((products::created_at.desc(), products::id.desc()))
            .select(DbProduct::as_select())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(Some(CategoryWithProducts {
            category: category.try_into()?,
            products,
        }))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let stored = diesel::insert_into(categories::table)
            .values(db_category)
            .returning(DbCategory::as_returning())
            .get_result::<DbCategory>(&mut conn)?;

        Ok(stored.try_into()?)
    }

    fn update_category(
        &self,
        id: CategoryId,
        name: &CategoryName,
        updated_at: NaiveDateTime,
    ) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let target = categories::table.filter(categories::id.eq(id.to_db_string()));
        let affected = diesel::update(target)
            .set((
                categories::name.eq(name.as_str()),
                categories::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(categories::table.filter(categories::id.eq(id.to_db_string())))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
