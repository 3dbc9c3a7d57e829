//! Use-case layer: free functions over repository trait bounds.
//!
//! Validation and business-rule failures surface as structured
//! [`ServiceError`] values with user-facing Russian messages; collaborator
//! failures are logged at the call site and propagated without mutating the
//! draft.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::steps::StepBlocked;

pub mod builder;
pub mod draft;
pub mod reference;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Не найдено")]
    NotFound,

    /// A user-correctable input problem, rendered as a form message.
    #[error("{0}")]
    Form(String),

    /// A business-rule conflict that must be resolved explicitly, never
    /// silently.
    #[error("{0}")]
    Conflict(String),

    /// A forward gate refused the transition; violations are field-level.
    #[error(transparent)]
    Blocked(#[from] StepBlocked),

    #[error("Некорректное значение: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}
