use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::Mutex;
use tracing::info;

use crate::chat::summary::{ChatSummaryRepository, StorageError};
use crate::chat::transcript::Transcript;
use crate::models::chat::{ChatMessage, ChatSummary, ConversationId, SenderId};

/// The chat widget's state: one transcript plus the summary store it reports to.
pub struct ChatSession {
    conversation_id: ConversationId,
    partner_name: String,
    transcript: Arc<Mutex<Transcript>>,
    summaries: Arc<dyn ChatSummaryRepository>,
}

impl ChatSession {
    pub fn new(
        conversation_id: ConversationId,
        partner_name: impl Into<String>,
        summaries: Arc<dyn ChatSummaryRepository>,
    ) -> Self {
        Self {
            conversation_id,
            partner_name: partner_name.into(),
            transcript: Arc::new(Mutex::new(Transcript::new())),
            summaries,
        }
    }

    /// Shared transcript, handed to the simulated responder.
    pub fn transcript(&self) -> Arc<Mutex<Transcript>> {
        self.transcript.clone()
    }

    pub fn summaries(&self) -> &Arc<dyn ChatSummaryRepository> {
        &self.summaries
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.lock().await.messages().to_vec()
    }

    pub async fn submit(&self, text: &str) -> Result<Option<ChatMessage>, StorageError> {
        self.submit_at(text, Local::now()).await
    }

    /// Upserts the conversation summary, then appends the user message.
    /// Whitespace-only text is ignored and yields `None`. When the summary write
    /// fails the transcript is left unchanged.
    pub async fn submit_at(
        &self,
        text: &str,
        at: DateTime<Local>,
    ) -> Result<Option<ChatMessage>, StorageError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        // Held across the write so the pending id stays valid.
        let mut transcript = self.transcript.lock().await;
        let pending = ChatMessage {
            id: transcript.next_id(),
            text: text.to_string(),
            sender_id: SenderId::Current,
            timestamp: at,
        };
        let summary = ChatSummary::from_message(self.conversation_id, &self.partner_name, &pending);
        self.summaries
            .upsert_summary(self.conversation_id, summary)
            .await?;
        let message = transcript.append(pending.text, pending.sender_id, pending.timestamp).clone();
        drop(transcript);

        info!(
            conversation_id = self.conversation_id,
            message_id = message.id,
            "chat message submitted"
        );
        Ok(Some(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::summary::InMemorySummaryRepository;
    use async_trait::async_trait;
    use chrono::TimeZone;

    struct ReadOnlyRepository;

    #[async_trait]
    impl ChatSummaryRepository for ReadOnlyRepository {
        async fn upsert_summary(
            &self,
            _conversation_id: ConversationId,
            _record: ChatSummary,
        ) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only store",
            )))
        }

        async fn list_summaries(&self) -> Result<Vec<ChatSummary>, StorageError> {
            Ok(Vec::new())
        }
    }

    fn session() -> ChatSession {
        ChatSession::new(1, "İK Uzmanı", Arc::new(InMemorySummaryRepository::new()))
    }

    #[tokio::test]
    async fn test_first_submit_creates_single_summary() {
        let session = session();
        assert!(session.summaries().list_summaries().await.unwrap().is_empty());

        session.submit("Merhaba, ilan hâlâ açık mı?").await.unwrap();

        let summaries = session.summaries().list_summaries().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, 1);
        assert_eq!(summaries[0].last_message, "Merhaba, ilan hâlâ açık mı?");
        assert_eq!(summaries[0].name, "İK Uzmanı");
    }

    #[tokio::test]
    async fn test_second_submit_updates_summary_in_place() {
        let session = session();
        let first = Local.with_ymd_and_hms(2024, 5, 2, 9, 15, 0).unwrap();
        let second = Local.with_ymd_and_hms(2024, 5, 2, 9, 42, 0).unwrap();

        session.submit_at("İlk mesaj", first).await.unwrap();
        session.submit_at("İkinci mesaj", second).await.unwrap();

        let summaries = session.summaries().list_summaries().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].last_message, "İkinci mesaj");
        assert_eq!(summaries[0].last_time, "09:42");
        assert_eq!(session.messages().await.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_submit_is_ignored() {
        let session = session();
        assert!(session.submit("   ").await.unwrap().is_none());
        assert!(session.messages().await.is_empty());
        assert!(session.summaries().list_summaries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_summary_write_leaves_transcript_untouched() {
        let session = ChatSession::new(1, "İK Uzmanı", Arc::new(ReadOnlyRepository));
        let result = session.submit("Merhaba").await;
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(session.messages().await.is_empty());
        assert_eq!(session.transcript().lock().await.next_id(), 1);
    }

    #[tokio::test]
    async fn test_submitted_message_is_from_current_user() {
        let session = session();
        let message = session.submit("Teşekkürler").await.unwrap().unwrap();
        assert_eq!(message.sender_id, SenderId::Current);
        assert_eq!(message.id, 1);
    }
}
