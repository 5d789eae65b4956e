//! The registration record submitted by the form.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Field keys in column order.
pub const FIELD_NAMES: [&str; 6] = ["name", "company", "role", "phoneNo", "email", "sentiment"];

/// First row written to every registration tab.
pub const HEADER_ROW: [&str; 6] = ["Name", "Company", "Role", "PhoneNo", "Email", "Sentiment"];

/// One registration submission.
///
/// Every field is optional: validators only check fields that are present.
/// Validation overwrites `phone_no` and `email` with their cleaned forms.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Record {
    /// Registrant's full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Company the registrant works for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Seniority as picked on the form (C-level, M-level, E-level)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Phone number(s), canonical after validation
    #[serde(rename = "phoneNo", skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,

    /// Email address(es), joined by `" - "` when there are several
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Experience rating, 1 to 5 stars
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
}

impl Record {
    /// Field values in column order.
    pub fn values(&self) -> [Option<&str>; 6] {
        [
            self.name.as_deref(),
            self.company.as_deref(),
            self.role.as_deref(),
            self.phone_no.as_deref(),
            self.email.as_deref(),
            self.sentiment.as_deref(),
        ]
    }

    /// Names of fields that are absent or blank.
    ///
    /// The form requires all six fields before anything is validated.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        FIELD_NAMES
            .iter()
            .zip(self.values())
            .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect()
    }

    /// The record as a spreadsheet row, absent fields left empty.
    pub fn to_row(&self) -> Vec<String> {
        self.values()
            .into_iter()
            .map(|value| value.unwrap_or_default().to_string())
            .collect()
    }
}
