//! Declarative field rules evaluated before any pipeline mutation.
//!
//! A rule set is a plain ordered slice of [`FieldRule`]s. Evaluation is pure,
//! visits every rule and reports violations in declaration order, so a client
//! receives the complete list rather than only the first failure.

use serde::Serialize;

use crate::domain::types::{CategoryId, ProductPrice};

/// Read access to named input fields, independent of the transport.
pub trait FieldSource {
    /// Value of `name`, or `None` when the field was not submitted.
    fn field(&self, name: &str) -> Option<&str>;
}

/// A rule that was not satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub path: &'static str,
    pub msg: &'static str,
}

/// Field name, predicate and human-readable message.
#[derive(Clone, Copy)]
pub struct FieldRule {
    field: &'static str,
    check: fn(&str) -> bool,
    message: &'static str,
    optional: bool,
}

fn is_not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

fn is_numeric(value: &str) -> bool {
    ProductPrice::parse(value).is_ok()
}

fn is_identifier(value: &str) -> bool {
    CategoryId::parse(value).is_ok()
}

impl FieldRule {
    /// The field must be present and contain non-whitespace text.
    pub const fn not_empty(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: is_not_blank,
            message,
            optional: false,
        }
    }

    /// The field must be present and be a plain signed decimal.
    pub const fn numeric(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: is_numeric,
            message,
            optional: false,
        }
    }

    /// The field must be present and parse as a record identifier.
    pub const fn identifier(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: is_identifier,
            message,
            optional: false,
        }
    }

    /// Only check the field when it was submitted.
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    fn evaluate<S: FieldSource + ?Sized>(&self, source: &S) -> Option<FieldViolation> {
        let passed = match source.field(self.field) {
            Some(value) => (self.check)(value),
            None => self.optional,
        };
        (!passed).then_some(FieldViolation {
            path: self.field,
            msg: self.message,
        })
    }
}

/// Evaluates every rule against `source`. An empty result means valid.
pub fn validate<S: FieldSource + ?Sized>(rules: &[FieldRule], source: &S) -> Vec<FieldViolation> {
    rules
        .iter()
        .filter_map(|rule| rule.evaluate(source))
        .collect()
}
