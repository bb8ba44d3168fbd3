use thiserror::Error;

use crate::forms::validation::FieldViolation;

/// Outcome of a failed pipeline, mapped to an HTTP response by the routes.
#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    /// The payload broke one or more field rules. Nothing was persisted.
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    /// The requested id does not resolve to a record.
    #[error("{0}")]
    NotFound(&'static str),
    /// The uploaded file type is not accepted.
    #[error("{0}")]
    UnsupportedMedia(&'static str),
    /// Persistence, object storage or email delivery failed.
    #[error("{0}")]
    Dependency(String),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
