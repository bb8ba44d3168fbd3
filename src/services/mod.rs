//! Request pipelines: validate, mutate, run side effects.
//!
//! Services never see HTTP types; routes hand them parsed forms and map the
//! returned [`ServiceError`] onto a response.

pub mod categories;
pub mod errors;
pub mod products;
pub mod upload;

pub use errors::{ServiceError, ServiceResult};
