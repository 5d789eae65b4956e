//! Email typo correction and validation.
//!
//! Addresses typed into the registration form are full of recurring
//! mistakes (`gmailcom`, `.cm`, stray commas, shouted upper case). The
//! functions here repair the known patterns and then check the result
//! against a lightweight address pattern.

use super::FIELD_SEPARATOR;
use once_cell::sync::Lazy;
use regex::Regex;

/// Observed typo patterns and their corrections.
///
/// Applied in order as plain substring replacements, so a later rule sees
/// the output of earlier ones. Historical data was cleaned with exactly
/// this sequence; reordering changes results.
pub const TYPO_CORRECTIONS: &[(&str, &str)] = &[
    ("@domain", ".com"),
    ("gmailcom", "gmail.com"),
    (".cm", ".com"),
    ("gamil.com", "gmail.com"),
    ("yahoocom", "yahoo.com"),
    ("gmai.com", "gmail.com"),
    ("yahoooo.com", "yahoo.com"),
    ("gmal", "gmail"),
    ("hanoieduvn", "hanoiedu.vn"),
    ("tayho,edu,vn", "tayho.edu.vn"),
    ("gmaill.com", "gmail.com"),
    ("gmil.com", "gmail.com"),
    ("yahô.com", "yahoo.com"),
    ("yanhoo.com", "yahoo.com"),
    ("gmailk", "gmail"),
    ("gmail..com", "gmail.com"),
    ("hanoiưdu", "hanoiedu"),
    ("nocomment.con", "nocomment.com"),
    ("gmaill@com", "gmail.com"),
    ("yahoocomvn", "yahoo.com.vn"),
    ("gmail. Com", "gmail.com"),
    ("gmail,com", "gmail.com"),
    ("@.gmail", "@gmail"),
    ("\"gmail", "@gmail"),
    ("Gmail", "gmail"),
    (".con", ".com"),
    (".co", ".com"),
];

const ADDRESS_PATTERN: &str = r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+";

/// Finds an address embedded in surrounding text.
static EMBEDDED_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(ADDRESS_PATTERN).expect("Failed to compile address regex"));

/// Matches a string that is exactly one address.
static WHOLE_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{})$", ADDRESS_PATTERN)).expect("Failed to compile address regex")
});

/// Repair common typos in a single email address.
///
/// Returns `None` only when there is no input. The result is a best effort
/// and may still be invalid; use [`validate_email`] to find out.
///
/// # Example
///
/// ```
/// use event_registration::domain::email::fix_typos;
///
/// assert_eq!(fix_typos(Some("john@gmailcom")).as_deref(), Some("john@gmail.com"));
/// assert_eq!(fix_typos(None), None);
/// ```
pub fn fix_typos(raw: Option<&str>) -> Option<String> {
    let raw = raw?;

    let mut email: String = raw
        .trim()
        .trim_matches('-')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    for (wrong, right) in TYPO_CORRECTIONS {
        email = email.replace(wrong, right);
    }

    if let Some(found) = EMBEDDED_ADDRESS.find(&email) {
        email = found.as_str().to_string();
    }

    // Treat "a@@b" and "a@b@c" as one domain.
    if email.matches('@').count() > 1 {
        let mut parts = email.split('@');
        let local = parts.next().unwrap_or_default();
        let domain: String = parts.collect();
        email = format!("{}@{}", local, domain);
    }

    if is_all_upper_case(&email) {
        email = email.to_lowercase();
    }

    if email.ends_with('.') {
        email.pop();
    }

    if email.ends_with("gmail") {
        email.push_str(".com");
    }

    if email.ends_with(".comm") {
        email.pop();
    }

    Some(email)
}

/// True when the text has cased letters and none of them are lower case.
fn is_all_upper_case(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Repair and validate a single address.
///
/// Returns the cleaned address together with whether it is structurally
/// valid. Absent input yields `(None, false)`.
pub fn validate_email(raw: Option<&str>) -> (Option<String>, bool) {
    match fix_typos(raw) {
        Some(cleaned) => {
            let valid = WHOLE_ADDRESS.is_match(&cleaned);
            (Some(cleaned), valid)
        }
        None => (None, false),
    }
}

/// Repair and validate an email field that may hold several addresses
/// joined by `" - "`.
///
/// The field is valid only if every sub-address is. Blank sub-addresses
/// are dropped before validation.
pub fn clean_emails(field: Option<&str>) -> (Option<String>, bool) {
    let Some(field) = field else {
        return (None, false);
    };

    let mut all_valid = true;
    let mut cleaned = Vec::new();

    for address in field.split(FIELD_SEPARATOR).map(str::trim) {
        if address.is_empty() {
            continue;
        }
        let (fixed, valid) = validate_email(Some(address));
        all_valid &= valid;
        cleaned.push(fixed.unwrap_or_default());
    }

    (Some(cleaned.join(FIELD_SEPARATOR)), all_valid)
}
