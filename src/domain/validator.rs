//! Record-level validation.
//!
//! Runs every field check against a [`Record`], cleaning the phone and
//! email fields in place along the way. Checks are independent and all of
//! them run; the caller gets every problem at once.

use super::email::clean_emails;
use super::errors::ValidationError;
use super::phone::{has_valid_digit_count, normalize_phone};
use super::record::Record;
use once_cell::sync::Lazy;
use regex::Regex;

/// Vietnamese letters with diacritics, upper and lower case.
const VIETNAMESE_LETTERS: &str = "ÀÁẢÃẠÂẤẦẨẪẬĂẮẰẲẴẶÈÉẺẼẸÊẾỀỂỄỆÌÍỈĨỊÒÓỎÕỌÔỐỒỔỖỘƠỚỜỞỠỢÙÚỦŨỤƯỨỪỬỮỰÝỲỶỸỴĐ\
                                  àáảãạâấầẩẫậăắằẳẵặèéẻẽẹêếềểễệìíỉĩịòóỏõọôốồổỗộơớờởỡợùúủũụưứừửữựýỳỷỹỵđ";

/// Word characters, whitespace and Vietnamese letters, minus digits.
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^[[\w\s{}]--\d]+$", VIETNAMESE_LETTERS))
        .expect("Failed to compile name regex")
});

/// Validate a record, cleaning `phone_no` and `email` in place.
///
/// Returns one error per failing field; an empty list means the record is
/// ready to be stored.
pub fn validate_record(record: &mut Record) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(name) = record.name.as_deref() {
        if !is_valid_name(name) {
            tracing::debug!("Rejected name: {:?}", name);
            errors.push(ValidationError::InvalidName(name.to_string()));
        }
    }

    if let Some(company) = record.company.as_deref() {
        if !is_valid_company(company) {
            tracing::debug!("Rejected company: {:?}", company);
            errors.push(ValidationError::InvalidCompany(company.to_string()));
        }
    }

    if let Some(raw) = record.phone_no.as_deref() {
        let cleaned = normalize_phone(raw);
        tracing::debug!("Phone normalized: {:?} -> {:?}", raw, cleaned);
        if !has_valid_digit_count(&cleaned) {
            errors.push(ValidationError::InvalidPhone(cleaned.clone()));
        }
        record.phone_no = Some(cleaned);
    }

    if record.email.is_some() {
        let (cleaned, valid) = clean_emails(record.email.as_deref());
        tracing::debug!("Email cleaned: {:?} (valid: {})", cleaned, valid);
        if !valid {
            errors.push(ValidationError::InvalidEmail(
                cleaned.clone().unwrap_or_default(),
            ));
        }
        record.email = cleaned;
    }

    errors
}

/// Names may contain letters and spaces only.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Company names may contain letters, digits and spaces only.
pub fn is_valid_company(company: &str) -> bool {
    let compact: String = company.chars().filter(|c| *c != ' ').collect();
    !compact.is_empty() && compact.chars().all(char::is_alphanumeric)
}
