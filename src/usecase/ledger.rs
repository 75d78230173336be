//! Message ledger: post, list, owner-only edit and delete.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    ChatError, ChatMessage, MessageKind, MessageStore, MessageText, ParticipantName,
    ParticipantStore, ValueObjectError,
};
use crate::time::Clock;

/// Validated parts of a client-posted message.
struct MessageParts {
    from: ParticipantName,
    to: ParticipantName,
    text: MessageText,
    kind: MessageKind,
}

/// Stores chat messages and enforces visibility and ownership rules.
pub struct MessageLedger {
    messages: Arc<dyn MessageStore>,
    participants: Arc<dyn ParticipantStore>,
    clock: Arc<dyn Clock>,
}

impl MessageLedger {
    pub fn new(
        messages: Arc<dyn MessageStore>,
        participants: Arc<dyn ParticipantStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            messages,
            participants,
            clock,
        }
    }

    /// Validate all message fields, collecting every violation.
    fn validate_parts(
        from: Option<&str>,
        to: &str,
        text: &str,
        kind: &str,
    ) -> Result<MessageParts, ChatError> {
        let mut violations = Vec::new();

        let from = match from {
            None => {
                violations.push(ValueObjectError::SenderMissing.to_string());
                None
            }
            Some(raw) => ParticipantName::new(raw)
                .map_err(|e| {
                    let e = match e {
                        ValueObjectError::NameEmpty => ValueObjectError::SenderMissing,
                        other => other,
                    };
                    violations.push(e.to_string());
                })
                .ok(),
        };
        let to = ParticipantName::recipient(to)
            .map_err(|e| violations.push(e.to_string()))
            .ok();
        let text = MessageText::new(text)
            .map_err(|e| violations.push(e.to_string()))
            .ok();
        let kind = MessageKind::parse_client(kind)
            .map_err(|e| violations.push(e.to_string()))
            .ok();

        match (from, to, text, kind) {
            (Some(from), Some(to), Some(text), Some(kind)) => Ok(MessageParts {
                from,
                to,
                text,
                kind,
            }),
            _ => Err(ChatError::Validation(violations)),
        }
    }

    /// Store a client message with a server-assigned time.
    ///
    /// Posting never refreshes the sender's presence; only `heartbeat` does.
    pub async fn post(
        &self,
        from: Option<&str>,
        to: &str,
        text: &str,
        kind: &str,
    ) -> Result<ChatMessage, ChatError> {
        let parts = Self::validate_parts(from, to, text, kind)?;

        let sender = self.participants.find_by_name(&parts.from).await?;
        if sender.is_none() {
            return Err(ChatError::UnknownSender(parts.from.into_string()));
        }

        let message = ChatMessage::new(
            parts.from,
            parts.to,
            parts.text,
            parts.kind,
            self.clock.clock_time(),
        );
        self.messages.insert(message.clone()).await?;
        Ok(message)
    }

    /// Messages visible to `reader`, in insertion order.
    ///
    /// A positive `limit` keeps only the most recent entries; anything else
    /// returns the full visible history.
    pub async fn list(
        &self,
        reader: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let reader = crate::domain::sanitize(reader);
        let visible = self.messages.visible_to(&reader).await?;

        match limit {
            Some(n) if n > 0 => {
                let skip = visible.len().saturating_sub(n as usize);
                Ok(visible.into_iter().skip(skip).collect())
            }
            _ => Ok(visible),
        }
    }

    /// Replace `to`/`text`/`kind` of an owned message; `from` is unchanged
    /// and `time` is refreshed.
    pub async fn edit_own(
        &self,
        id: Uuid,
        editor: Option<&str>,
        to: &str,
        text: &str,
        kind: &str,
    ) -> Result<(), ChatError> {
        let parts = Self::validate_parts(editor, to, text, kind)?;

        let editor = self.participants.find_by_name(&parts.from).await?;
        let Some(editor) = editor else {
            return Err(ChatError::ParticipantNotFound(parts.from.into_string()));
        };

        let message = self
            .messages
            .find_by_id(id)
            .await?
            .ok_or_else(|| ChatError::MessageNotFound(id.to_string()))?;
        if !message.owned_by(editor.name.as_str()) {
            return Err(ChatError::NotOwner(editor.name.into_string()));
        }

        let edited = ChatMessage {
            id: message.id,
            from: message.from,
            to: parts.to,
            text: parts.text,
            kind: parts.kind,
            time: self.clock.clock_time(),
        };
        let replaced = self.messages.replace(edited).await?;
        if !replaced {
            // Deleted between the read and the replace.
            return Err(ChatError::MessageNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Delete an owned message.
    pub async fn delete_own(&self, id: Uuid, requester: &str) -> Result<(), ChatError> {
        let requester = crate::domain::sanitize(requester);

        let message = self
            .messages
            .find_by_id(id)
            .await?
            .ok_or_else(|| ChatError::MessageNotFound(id.to_string()))?;
        if !message.owned_by(&requester) {
            return Err(ChatError::NotOwner(requester));
        }

        self.messages.remove(id).await?;
        Ok(())
    }
}
