//! In-memory `messages` collection.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{ChatMessage, MessageStore, StoreError};

/// In-memory message store. Insertion order is preserved.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, message: ChatMessage) -> Result<(), StoreError> {
        let mut messages = self.messages.lock().await;
        messages.push(message);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatMessage>, StoreError> {
        let messages = self.messages.lock().await;
        Ok(messages.iter().find(|m| m.id == id).cloned())
    }

    async fn visible_to(&self, reader: &str) -> Result<Vec<ChatMessage>, StoreError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| m.visible_to(reader))
            .cloned()
            .collect())
    }

    async fn replace(&self, message: ChatMessage) -> Result<bool, StoreError> {
        let mut messages = self.messages.lock().await;
        match messages.iter_mut().find(|m| m.id == message.id) {
            Some(slot) => {
                *slot = message;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut messages = self.messages.lock().await;
        match messages.iter().position(|m| m.id == id) {
            Some(index) => {
                messages.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BROADCAST, MessageKind, MessageText, ParticipantName};

    fn message(from: &str, to: &str, text: &str, kind: MessageKind) -> ChatMessage {
        ChatMessage::new(
            ParticipantName::new(from).unwrap(),
            ParticipantName::new(to).unwrap(),
            MessageText::new(text).unwrap(),
            kind,
            "10:00:00".to_string(),
        )
    }

    #[tokio::test]
    async fn test_visible_to_applies_reader_filter_in_order() {
        // given (precondition):
        let store = InMemoryMessageStore::new();
        store
            .insert(message("alice", "bob", "m1", MessageKind::PrivateMessage))
            .await
            .unwrap();
        store
            .insert(message("carol", "dave", "m2", MessageKind::Message))
            .await
            .unwrap();
        store
            .insert(message("alice", "dave", "m3", MessageKind::PrivateMessage))
            .await
            .unwrap();
        store
            .insert(message("carol", BROADCAST, "m4", MessageKind::Status))
            .await
            .unwrap();

        // when (operation):
        let visible = store.visible_to("bob").await.unwrap();

        // then (expected result): private alice->dave excluded, order kept
        let texts: Vec<_> = visible.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["m1", "m2", "m4"]);
    }

    #[tokio::test]
    async fn test_replace_swaps_message_with_same_id() {
        // given (precondition):
        let store = InMemoryMessageStore::new();
        let original = message("alice", "bob", "oi", MessageKind::PrivateMessage);
        let id = original.id;
        store.insert(original.clone()).await.unwrap();

        // when (operation):
        let mut edited = message("alice", BROADCAST, "tchau", MessageKind::Message);
        edited.id = id;
        let replaced = store.replace(edited).await.unwrap();

        // then (expected result):
        assert!(replaced);
        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.text.as_str(), "tchau");
    }

    #[tokio::test]
    async fn test_replace_unknown_id_returns_false() {
        // given (precondition):
        let store = InMemoryMessageStore::new();

        // when (operation):
        let replaced = store
            .replace(message("alice", "bob", "oi", MessageKind::PrivateMessage))
            .await
            .unwrap();

        // then (expected result):
        assert!(!replaced);
    }

    #[tokio::test]
    async fn test_remove_deletes_message() {
        // given (precondition):
        let store = InMemoryMessageStore::new();
        let msg = message("alice", "bob", "oi", MessageKind::PrivateMessage);
        let id = msg.id;
        store.insert(msg).await.unwrap();

        // when (operation):
        let removed = store.remove(id).await.unwrap();

        // then (expected result):
        assert!(removed);
        assert!(store.find_by_id(id).await.unwrap().is_none());
    }
}
