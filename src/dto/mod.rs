//! JSON shapes returned by the HTTP API.
//!
//! Records are serialized in camelCase with RFC 3339 UTC timestamps; the
//! envelope types wrap them for mutation responses and failures.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::forms::validation::FieldViolation;

pub mod categories;
pub mod products;

/// Stored timestamps are naive UTC.
pub(crate) fn utc(value: NaiveDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(value, Utc)
}

/// `{message, category}` answered by category create and update.
#[derive(Debug, Serialize)]
pub struct CategoryMessage<T> {
    pub message: &'static str,
    pub category: T,
}

/// `{message}` answered by deletions.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// `{error}` answered by every failure except validation.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// `{errors: [{path, msg}]}` answered when field rules fail.
#[derive(Debug, Serialize)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldViolation>,
}
