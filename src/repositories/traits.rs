use crate::error::SheetResult;
use async_trait::async_trait;

/// Store for accepted registrations.
///
/// Models a workbook of dated worksheet tabs, each starting with a header
/// row. Implementations may be backed by a hosted spreadsheet, a database
/// or memory.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Create the tab with the header row if it does not exist yet.
    async fn open_or_create_tab(&self, title: &str) -> SheetResult<()>;

    /// Append a row to an existing tab.
    async fn append_row(&self, title: &str, row: Vec<String>) -> SheetResult<()>;

    /// All rows of a tab, header first.
    async fn rows(&self, title: &str) -> SheetResult<Vec<Vec<String>>>;
}
