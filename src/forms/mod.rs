//! Request payload parsing and validation.

use thiserror::Error;

use self::validation::FieldViolation;

pub mod categories;
pub mod products;
pub mod validation;

/// Raised when a submitted payload breaks one or more field rules.
#[derive(Debug, Error, PartialEq)]
#[error("form validation failed")]
pub struct FormError(pub Vec<FieldViolation>);
