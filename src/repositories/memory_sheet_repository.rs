use crate::domain::record::HEADER_ROW;
use crate::error::{SheetError, SheetResult};
use crate::repositories::traits::RegistrationRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registration workbook held in memory.
///
/// Each tab is capped at `capacity` rows including its header, like a
/// worksheet created with a fixed row count. Clones share the same tabs.
#[derive(Clone)]
pub struct MemorySheetRepository {
    tabs: Arc<RwLock<HashMap<String, Vec<Vec<String>>>>>,
    capacity: usize,
}

impl MemorySheetRepository {
    /// Create an empty workbook whose tabs hold at most `capacity` rows.
    pub fn new(capacity: usize) -> Self {
        Self {
            tabs: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Titles of all tabs, sorted.
    pub fn tab_titles(&self) -> SheetResult<Vec<String>> {
        let tabs = self.tabs.read().map_err(|_| Self::poisoned())?;
        let mut titles: Vec<String> = tabs.keys().cloned().collect();
        titles.sort();
        Ok(titles)
    }

    fn poisoned() -> SheetError {
        SheetError::Backend("workbook lock poisoned".to_string())
    }
}

impl Default for MemorySheetRepository {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl RegistrationRepository for MemorySheetRepository {
    async fn open_or_create_tab(&self, title: &str) -> SheetResult<()> {
        let mut tabs = self.tabs.write().map_err(|_| Self::poisoned())?;
        tabs.entry(title.to_string()).or_insert_with(|| {
            tracing::info!("Creating worksheet tab {}", title);
            vec![HEADER_ROW.iter().map(|h| h.to_string()).collect()]
        });
        Ok(())
    }

    async fn append_row(&self, title: &str, row: Vec<String>) -> SheetResult<()> {
        let mut tabs = self.tabs.write().map_err(|_| Self::poisoned())?;
        let rows = tabs
            .get_mut(title)
            .ok_or_else(|| SheetError::TabNotFound(title.to_string()))?;

        if rows.len() >= self.capacity {
            return Err(SheetError::TabFull {
                title: title.to_string(),
                capacity: self.capacity,
            });
        }

        rows.push(row);
        Ok(())
    }

    async fn rows(&self, title: &str) -> SheetResult<Vec<Vec<String>>> {
        let tabs = self.tabs.read().map_err(|_| Self::poisoned())?;
        tabs.get(title)
            .cloned()
            .ok_or_else(|| SheetError::TabNotFound(title.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> Vec<String> {
        vec![name.to_string(), String::new()]
    }

    #[tokio::test]
    async fn test_open_creates_header_once() {
        let repo = MemorySheetRepository::default();
        repo.open_or_create_tab("Form_2024-05-01").await.unwrap();
        repo.open_or_create_tab("Form_2024-05-01").await.unwrap();

        let rows = repo.rows("Form_2024-05-01").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "Name");
        assert_eq!(rows[0][5], "Sentiment");
    }

    #[tokio::test]
    async fn test_append_requires_tab() {
        let repo = MemorySheetRepository::default();
        let result = repo.append_row("Form_2024-05-01", row("An")).await;
        assert_eq!(
            result,
            Err(SheetError::TabNotFound("Form_2024-05-01".to_string()))
        );
    }

    #[tokio::test]
    async fn test_append_respects_capacity() {
        let repo = MemorySheetRepository::new(3);
        repo.open_or_create_tab("t").await.unwrap();
        repo.append_row("t", row("a")).await.unwrap();
        repo.append_row("t", row("b")).await.unwrap();

        let result = repo.append_row("t", row("c")).await;
        assert!(matches!(result, Err(SheetError::TabFull { capacity: 3, .. })));
        assert_eq!(repo.rows("t").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_tabs() {
        let repo = MemorySheetRepository::default();
        let other = repo.clone();
        other.open_or_create_tab("b").await.unwrap();
        repo.open_or_create_tab("a").await.unwrap();

        assert_eq!(repo.tab_titles().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_poisoned_lock_reported() {
        let repo = MemorySheetRepository::default();
        let tabs = Arc::clone(&repo.tabs);
        let _ = std::thread::spawn(move || {
            let _guard = tabs.write().unwrap();
            panic!("poison the workbook lock");
        })
        .join();

        assert_eq!(repo.tab_titles(), Err(MemorySheetRepository::poisoned()));
        assert_eq!(
            repo.open_or_create_tab("a").await,
            Err(MemorySheetRepository::poisoned())
        );
    }
}
