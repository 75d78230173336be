//! Core domain models for the chat room.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_object::{MessageKind, MessageText, ParticipantName, Timestamp};

/// Recipient name that addresses every participant in the room.
pub const BROADCAST: &str = "Todos";

/// Text of the system message synthesized on join.
pub const JOIN_TEXT: &str = "entra na sala...";

/// Text of the system message synthesized on leave/eviction.
pub const LEAVE_TEXT: &str = "sai da sala...";

/// An active chat identity, keyed by unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: ParticipantName,
    /// Last heartbeat (or join) instant.
    pub last_status: Timestamp,
}

impl Participant {
    pub fn new(name: ParticipantName, joined_at: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            last_status: joined_at,
        }
    }

    /// Whether this participant has been silent for longer than `timeout_ms`.
    pub fn is_stale(&self, now: Timestamp, timeout_ms: i64) -> bool {
        self.last_status.elapsed(now) > timeout_ms
    }
}

/// A chat message, client-posted or system-synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub from: ParticipantName,
    pub to: ParticipantName,
    pub text: MessageText,
    pub kind: MessageKind,
    /// Server-assigned local clock time ("HH:MM:SS").
    pub time: String,
}

impl ChatMessage {
    pub fn new(
        from: ParticipantName,
        to: ParticipantName,
        text: MessageText,
        kind: MessageKind,
        time: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from,
            to,
            text,
            kind,
            time,
        }
    }

    /// System message announcing that `name` entered the room.
    pub fn joined(name: ParticipantName, time: String) -> Self {
        Self::system(name, JOIN_TEXT, time)
    }

    /// System message announcing that `name` left the room.
    pub fn left(name: ParticipantName, time: String) -> Self {
        Self::system(name, LEAVE_TEXT, time)
    }

    fn system(name: ParticipantName, text: &str, time: String) -> Self {
        // The fixed texts are non-empty, so this cannot fail.
        let text = MessageText::new(text).unwrap_or_else(|_| unreachable!());
        Self::new(
            name,
            ParticipantName::new(BROADCAST).unwrap_or_else(|_| unreachable!()),
            text,
            MessageKind::Status,
            time,
        )
    }

    /// Per-reader visibility: public messages, broadcasts, and private
    /// exchanges where the reader is either endpoint.
    pub fn visible_to(&self, reader: &str) -> bool {
        self.kind == MessageKind::Message
            || self.to == *reader
            || self.to == *BROADCAST
            || self.from == *reader
    }

    /// Whether `requester` may edit or delete this message.
    pub fn owned_by(&self, requester: &str) -> bool {
        self.from == *requester
    }
}
