//! Chat summary persistence behind a swappable repository.
//!
//! The store is a single JSON array of `{id, name, lastMessage, lastTime}` records.
//! Upsert matches on `id`: update in place or append.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::chat::{ChatSummary, ConversationId};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

#[async_trait]
pub trait ChatSummaryRepository: Send + Sync {
    /// Inserts or replaces the summary for `conversation_id`.
    /// The stored record always carries `conversation_id` as its `id`.
    async fn upsert_summary(
        &self,
        conversation_id: ConversationId,
        record: ChatSummary,
    ) -> Result<(), StorageError>;

    async fn list_summaries(&self) -> Result<Vec<ChatSummary>, StorageError>;
}

/// Applies upsert semantics to an in-memory list.
pub fn upsert_into(
    summaries: &mut Vec<ChatSummary>,
    conversation_id: ConversationId,
    mut record: ChatSummary,
) {
    record.id = conversation_id;
    match summaries.iter_mut().find(|s| s.id == conversation_id) {
        Some(existing) => *existing = record,
        None => summaries.push(record),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory repository
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct InMemorySummaryRepository {
    summaries: Arc<Mutex<Vec<ChatSummary>>>,
}

impl InMemorySummaryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatSummaryRepository for InMemorySummaryRepository {
    async fn upsert_summary(
        &self,
        conversation_id: ConversationId,
        record: ChatSummary,
    ) -> Result<(), StorageError> {
        let mut summaries = self.summaries.lock().await;
        upsert_into(&mut summaries, conversation_id, record);
        Ok(())
    }

    async fn list_summaries(&self) -> Result<Vec<ChatSummary>, StorageError> {
        Ok(self.summaries.lock().await.clone())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// JSON file repository
// ────────────────────────────────────────────────────────────────────────────

/// Stores summaries in one JSON file. Writes go through a temp file in the same
/// directory followed by a rename, so readers never see a partial file.
#[derive(Debug, Clone)]
pub struct JsonFileSummaryRepository {
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    lock: Arc<Mutex<()>>,
}

impl JsonFileSummaryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> Result<T, StorageError> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || f(&path))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

/// Reads the summary list. A missing file is an empty list; so is a malformed one.
fn read_summaries(path: &Path) -> Result<Vec<ChatSummary>, StorageError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    match serde_json::from_str(&raw) {
        Ok(summaries) => Ok(summaries),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "chat summary file is malformed; starting empty");
            Ok(Vec::new())
        }
    }
}

fn write_summaries(path: &Path, summaries: &[ChatSummary]) -> Result<(), StorageError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    serde_json::to_writer_pretty(tmp.as_file_mut(), summaries)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StorageError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl ChatSummaryRepository for JsonFileSummaryRepository {
    async fn upsert_summary(
        &self,
        conversation_id: ConversationId,
        record: ChatSummary,
    ) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.blocking(move |path| {
            let mut summaries = read_summaries(path)?;
            upsert_into(&mut summaries, conversation_id, record);
            write_summaries(path, &summaries)?;
            debug!(conversation_id, count = summaries.len(), "chat summary upserted");
            Ok(())
        })
        .await
    }

    async fn list_summaries(&self) -> Result<Vec<ChatSummary>, StorageError> {
        let _guard = self.lock.lock().await;
        self.blocking(read_summaries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: ConversationId, text: &str, time: &str) -> ChatSummary {
        ChatSummary {
            id,
            name: "İK Uzmanı".to_string(),
            last_message: text.to_string(),
            last_time: time.to_string(),
        }
    }

    #[test]
    fn test_upsert_into_appends_then_updates_in_place() {
        let mut summaries = vec![summary(7, "eski", "08:00")];
        upsert_into(&mut summaries, 1, summary(0, "ilk", "09:00"));
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].id, 1);

        upsert_into(&mut summaries, 1, summary(1, "ikinci", "09:05"));
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].last_message, "ikinci");
        assert_eq!(summaries[0].last_message, "eski");
    }

    #[tokio::test]
    async fn test_in_memory_repository_upsert() {
        let repo = InMemorySummaryRepository::new();
        repo.upsert_summary(1, summary(1, "Merhaba", "10:00"))
            .await
            .unwrap();
        repo.upsert_summary(1, summary(1, "Nasılsınız?", "10:01"))
            .await
            .unwrap();
        let all = repo.list_summaries().await.unwrap();
        assert_eq!(all, vec![summary(1, "Nasılsınız?", "10:01")]);
    }

    #[tokio::test]
    async fn test_json_file_repository_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chats.json");

        let repo = JsonFileSummaryRepository::new(&path);
        assert!(repo.list_summaries().await.unwrap().is_empty());
        repo.upsert_summary(1, summary(1, "Merhaba", "10:00"))
            .await
            .unwrap();

        let reopened = JsonFileSummaryRepository::new(&path);
        reopened
            .upsert_summary(1, summary(1, "Görüşmek üzere", "10:02"))
            .await
            .unwrap();
        let all = reopened.list_summaries().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].last_message, "Görüşmek üzere");

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"lastMessage\""));
        assert!(raw.contains("\"lastTime\""));
    }

    #[tokio::test]
    async fn test_malformed_file_is_treated_as_empty_and_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chats.json");
        std::fs::write(&path, "{ not json").unwrap();

        let repo = JsonFileSummaryRepository::new(&path);
        assert!(repo.list_summaries().await.unwrap().is_empty());
        repo.upsert_summary(1, summary(1, "Merhaba", "10:00"))
            .await
            .unwrap();
        assert_eq!(repo.list_summaries().await.unwrap().len(), 1);
    }
}
