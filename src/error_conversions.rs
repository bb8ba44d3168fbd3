//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! the `From` impls connecting them live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::forms::FormError;
    use crate::notifications::NotificationError;
    use crate::repository::errors::RepositoryError;
    use crate::services::ServiceError;
    use crate::storage::StorageError;

    impl From<FormError> for ServiceError {
        fn from(val: FormError) -> Self {
            ServiceError::Validation(val.0)
        }
    }

    impl From<RepositoryError> for ServiceError {
        fn from(val: RepositoryError) -> Self {
            ServiceError::Dependency(val.to_string())
        }
    }

    impl From<NotificationError> for ServiceError {
        fn from(val: NotificationError) -> Self {
            ServiceError::Dependency(val.to_string())
        }
    }

    impl From<StorageError> for ServiceError {
        fn from(val: StorageError) -> Self {
            ServiceError::Dependency(val.to_string())
        }
    }
}
