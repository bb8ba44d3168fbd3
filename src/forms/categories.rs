use chrono::Utc;
use serde::Deserialize;

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryId, CategoryName};
use crate::forms::FormError;
use crate::forms::validation::{FieldRule, FieldSource, FieldViolation, validate};

pub const CATEGORY_NAME_REQUIRED: &str = "O nome da categoria é obrigatório";

/// Rules shared by category creation and update; the name is required in both.
pub const CATEGORY_RULES: &[FieldRule] = &[FieldRule::not_empty("name", CATEGORY_NAME_REQUIRED)];

/// JSON body accepted by `POST /api/categories` and `PUT /api/categories/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryForm {
    pub name: Option<String>,
}

impl FieldSource for CategoryForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            _ => None,
        }
    }
}

/// Validated category payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormPayload {
    pub name: CategoryName,
}

impl CategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            id: CategoryId::generate(),
            name: self.name,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<CategoryForm> for CategoryFormPayload {
    type Error = FormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        let violations = validate(CATEGORY_RULES, &value);
        if !violations.is_empty() {
            return Err(FormError(violations));
        }

        let name = CategoryName::new(value.name.unwrap_or_default()).map_err(|_| {
            FormError(vec![FieldViolation {
                path: "name",
                msg: CATEGORY_NAME_REQUIRED,
            }])
        })?;

        Ok(Self { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_name() {
        let form = CategoryForm {
            name: Some(" Beverages ".to_string()),
        };

        let payload: CategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.name.as_str(), "Beverages");
    }

    #[test]
    fn rejects_missing_name() {
        let err = CategoryFormPayload::try_from(CategoryForm::default()).unwrap_err();
        assert_eq!(err.0.len(), 1);
        assert_eq!(err.0[0].msg, CATEGORY_NAME_REQUIRED);
    }

    #[test]
    fn rejects_blank_name() {
        let form = CategoryForm {
            name: Some("   ".to_string()),
        };
        assert!(CategoryFormPayload::try_from(form).is_err());
    }

    #[test]
    fn new_category_gets_fresh_id_and_timestamps() {
        let payload = CategoryFormPayload {
            name: CategoryName::new("Tea").unwrap(),
        };
        let first = payload.clone().into_new_category();
        let second = payload.into_new_category();

        assert_ne!(first.id, second.id);
        assert_eq!(first.created_at, first.updated_at);
    }
}
