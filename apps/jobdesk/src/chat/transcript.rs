use chrono::{DateTime, Local};

use crate::models::chat::{ChatMessage, SenderId};

/// Append-only, ordered chat transcript. Sequence ids start at 1.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        text: impl Into<String>,
        sender_id: SenderId,
        timestamp: DateTime<Local>,
    ) -> &ChatMessage {
        let id = self.next_id();
        self.messages.push(ChatMessage {
            id,
            text: text.into(),
            sender_id,
            timestamp,
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Id the next appended message will receive.
    pub fn next_id(&self) -> u64 {
        self.messages.len() as u64 + 1
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

}

#[cfg(test)]
impl Transcript {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn count_from(&self, sender_id: SenderId) -> usize {
        self.messages
            .iter()
            .filter(|m| m.sender_id == sender_id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_increasing_ids_in_order() {
        let mut transcript = Transcript::new();
        let now = Local::now();
        transcript.append("Merhaba", SenderId::Current, now);
        transcript.append("Hoş geldiniz", SenderId::Other, now);
        transcript.append("Teşekkürler", SenderId::Current, now);

        let ids: Vec<u64> = transcript.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(transcript.messages()[1].text, "Hoş geldiniz");
        assert_eq!(transcript.count_from(SenderId::Current), 2);
    }
}
