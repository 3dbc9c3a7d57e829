//! Form definitions backing the builder's input surfaces.
//!
//! Forms carry raw user input; validation happens with `validator` derives
//! and the conversion into domain values produces one [`FormError`] per
//! problem the user can fix.

use thiserror::Error;
use validator::ValidationErrors;

pub mod charge;
pub mod delivery;
pub mod dish;
pub mod event;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid subcategory id")]
    InvalidSubcategory,

    #[error("unknown service group")]
    UnknownServiceGroup,

    #[error("unknown dish")]
    UnknownDish,
}
