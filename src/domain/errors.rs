//! Registration field validation errors.

use thiserror::Error;

/// A problem found in one field of a registration record.
///
/// Each variant carries the offending value as it stood after cleaning, so
/// callers can echo what was actually checked. The `Display` text is the
/// message shown to the registrant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The name contains digits or punctuation.
    #[error("Tên riêng không thể bao gồm số.")]
    InvalidName(String),

    /// The company name contains special characters.
    #[error("Tên công ty đang chứa ký hiệu đặc biệt.")]
    InvalidCompany(String),

    /// The phone number does not have 10 or 11 digits after normalization.
    #[error("Số điện thoại chưa hợp lệ.")]
    InvalidPhone(String),

    /// At least one email sub-address failed validation.
    #[error("Địa chỉ email chưa hợp lệ.")]
    InvalidEmail(String),
}

impl ValidationError {
    /// Name of the record field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "name",
            Self::InvalidCompany(_) => "company",
            Self::InvalidPhone(_) => "phoneNo",
            Self::InvalidEmail(_) => "email",
        }
    }

    /// The value that failed validation.
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidName(v)
            | Self::InvalidCompany(v)
            | Self::InvalidPhone(v)
            | Self::InvalidEmail(v) => v,
        }
    }
}
