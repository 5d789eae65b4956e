//! Registration domain: the submitted record and the pipeline that cleans
//! and validates it.
//!
//! The phone and email normalizers are independent of each other; the
//! record validator composes them with the name and company checks. None of
//! this code performs I/O.

pub mod email;
pub mod errors;
pub mod phone;
pub mod record;
pub mod validator;

/// Separator between alternative values within one field.
pub const FIELD_SEPARATOR: &str = " - ";

pub use email::{clean_emails, fix_typos, validate_email};
pub use errors::ValidationError;
pub use phone::normalize_phone;
pub use record::Record;
pub use validator::validate_record;
