//! Storage seam for accepted registrations.

mod memory_sheet_repository;
mod traits;

pub use memory_sheet_repository::MemorySheetRepository;
pub use traits::RegistrationRepository;

use chrono::NaiveDate;

/// Title of the worksheet tab that collects registrations for `date`.
///
/// ```
/// use chrono::NaiveDate;
/// use event_registration::repositories::dated_tab_title;
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// assert_eq!(dated_tab_title("Form_", date), "Form_2024-05-01");
/// ```
pub fn dated_tab_title(prefix: &str, date: NaiveDate) -> String {
    format!("{}{}", prefix, date.format("%Y-%m-%d"))
}
