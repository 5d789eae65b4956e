use async_trait::async_trait;
use event_registration::error::{SheetError, SheetResult};
use event_registration::repositories::RegistrationRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock registration repository for testing.
///
/// Keeps tabs in memory, tracks method calls for verification and can be
/// told to fail every append.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockRegistrationRepository {
    tabs: Arc<Mutex<HashMap<String, Vec<Vec<String>>>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    fail_appends: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockRegistrationRepository {
    /// Create a new empty MockRegistrationRepository.
    pub fn new() -> Self {
        Self {
            tabs: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            fail_appends: Arc::new(Mutex::new(false)),
        }
    }

    /// Make every subsequent append fail with a backend error.
    pub fn fail_appends(&self) {
        *self.fail_appends.lock().unwrap() = true;
    }

    /// Data rows (header excluded) stored in a tab.
    pub fn data_rows(&self, title: &str) -> Vec<Vec<String>> {
        let tabs = self.tabs.lock().unwrap();
        tabs.get(title)
            .map(|rows| rows.iter().skip(1).cloned().collect())
            .unwrap_or_default()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockRegistrationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationRepository for MockRegistrationRepository {
    async fn open_or_create_tab(&self, title: &str) -> SheetResult<()> {
        self.track_call("open_or_create_tab");

        let mut tabs = self.tabs.lock().unwrap();
        tabs.entry(title.to_string())
            .or_insert_with(|| vec![vec!["header".to_string()]]);
        Ok(())
    }

    async fn append_row(&self, title: &str, row: Vec<String>) -> SheetResult<()> {
        self.track_call("append_row");

        if *self.fail_appends.lock().unwrap() {
            return Err(SheetError::Backend("mock append failure".to_string()));
        }

        let mut tabs = self.tabs.lock().unwrap();
        tabs.get_mut(title)
            .ok_or_else(|| SheetError::TabNotFound(title.to_string()))?
            .push(row);
        Ok(())
    }

    async fn rows(&self, title: &str) -> SheetResult<Vec<Vec<String>>> {
        self.track_call("rows");

        let tabs = self.tabs.lock().unwrap();
        tabs.get(title)
            .cloned()
            .ok_or_else(|| SheetError::TabNotFound(title.to_string()))
    }
}
