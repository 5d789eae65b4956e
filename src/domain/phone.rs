//! Phone number canonicalization.
//!
//! Registrants type phone numbers in every shape imaginable: with dots,
//! parentheses, the `+84` country code, or several numbers separated by `/`.
//! [`normalize_phone`] rewrites all of them into the canonical grouping
//! `dddd ddd ddd` (10 digits) or `dddd ddd dddd` (11 digits), with
//! alternatives joined by `" - "`.

use super::FIELD_SEPARATOR;
use once_cell::sync::Lazy;
use regex::Regex;

/// A field that starts with a canonical group has already been normalized.
static CANONICAL_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4} [0-9]{3} [0-9]{3,4}").expect("Failed to compile canonical phone regex")
});

/// Characters that never carry meaning in a phone number.
static NOISE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.\s()]").expect("Failed to compile phone noise regex"));

static LEADING_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+").expect("Failed to compile leading digits regex"));

/// Normalize a raw phone field into canonical grouping.
///
/// Input that starts with a canonical group is returned untouched, so a
/// second pass never changes a normalized field. Numbers whose digit run is
/// neither 10 nor 11 digits long come back cleaned but ungrouped; the record
/// validator rejects them by digit count.
///
/// Every `/`-part is kept, empty ones included: `"0987123456/"` becomes
/// `"0987 123 456 - "` with a dangling separator.
///
/// # Example
///
/// ```
/// use event_registration::domain::phone::normalize_phone;
///
/// assert_eq!(normalize_phone("+84 987.123.456"), "0987 123 456");
/// assert_eq!(
///     normalize_phone("0123456789/0987654321"),
///     "0123 456 789 - 0987 654 321"
/// );
/// ```
pub fn normalize_phone(raw: &str) -> String {
    if CANONICAL_PHONE.is_match(raw) {
        return raw.to_string();
    }

    let phone = raw.replace('|', "-");
    let phone = NOISE_CHARS.replace_all(&phone, "");
    let phone = replace_country_code(&phone);

    if phone.contains('/') {
        return phone
            .split('/')
            .map(|part| normalize_phone(&part.trim().replace('-', "")))
            .collect::<Vec<_>>()
            .join(FIELD_SEPARATOR);
    }

    let phone = phone.replace('-', "");
    let Some(run) = LEADING_DIGITS.find(&phone) else {
        return phone;
    };

    let digits = if run.as_str().starts_with('0') {
        run.as_str().to_string()
    } else {
        format!("0{}", run.as_str())
    };

    match digits.len() {
        10 | 11 => format!("{} {} {}", &digits[..4], &digits[4..7], &digits[7..]),
        _ => phone,
    }
}

/// Turn a leading `+84` or `84` into the national `0` prefix.
fn replace_country_code(phone: &str) -> String {
    if let Some(rest) = phone.strip_prefix("+84") {
        format!("0{}", rest)
    } else if let Some(rest) = phone.strip_prefix("84") {
        format!("0{}", rest)
    } else {
        phone.to_string()
    }
}

/// Count the ASCII digits in a phone field.
pub fn digit_count(phone: &str) -> usize {
    phone.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Whether a normalized phone field holds exactly one 10- or 11-digit number.
pub fn has_valid_digit_count(phone: &str) -> bool {
    matches!(digit_count(phone), 10 | 11)
}
