use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Identifies a conversation in the chat summary store.
pub type ConversationId = u64;

/// Who sent a chat message: the local user or the simulated counter-party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderId {
    Current,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sequence number within the transcript, starting at 1.
    pub id: u64,
    pub text: String,
    pub sender_id: SenderId,
    pub timestamp: DateTime<Local>,
}

/// Derived per-conversation record persisted outside the transcript.
///
/// Serialized with the exact camelCase keys consumers of the store expect:
/// `{id, name, lastMessage, lastTime}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: ConversationId,
    pub name: String,
    pub last_message: String,
    /// Local time of the last message as `HH:MM`.
    pub last_time: String,
}

impl ChatSummary {
    pub fn from_message(id: ConversationId, name: &str, message: &ChatMessage) -> Self {
        ChatSummary {
            id,
            name: name.to_string(),
            last_message: message.text.clone(),
            last_time: message.timestamp.format("%H:%M").to_string(),
        }
    }
}
