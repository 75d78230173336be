//! Presence registry: join, heartbeat, list.

use std::sync::Arc;

use crate::domain::{
    ChatError, ChatMessage, MessageStore, Participant, ParticipantName, ParticipantStore,
    Timestamp,
};
use crate::time::Clock;

/// Tracks active participants and their last-seen timestamp.
pub struct PresenceRegistry {
    participants: Arc<dyn ParticipantStore>,
    messages: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
}

impl PresenceRegistry {
    pub fn new(
        participants: Arc<dyn ParticipantStore>,
        messages: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participants,
            messages,
            clock,
        }
    }

    /// Register a participant and announce the join to the room.
    ///
    /// Uniqueness is enforced by the store's insert-if-absent, so two
    /// concurrent joins with the same name cannot both succeed.
    pub async fn join(&self, raw_name: &str) -> Result<Participant, ChatError> {
        let name = ParticipantName::new(raw_name).map_err(ChatError::invalid)?;

        let participant = Participant::new(name.clone(), Timestamp::new(self.clock.now_millis()));
        let inserted = self.participants.insert_if_absent(participant.clone()).await?;
        if !inserted {
            return Err(ChatError::NameTaken(name.into_string()));
        }

        self.messages
            .insert(ChatMessage::joined(name.clone(), self.clock.clock_time()))
            .await?;

        tracing::info!(name = %name, "participant joined");
        Ok(participant)
    }

    /// Refresh the participant's `last_status`.
    pub async fn heartbeat(&self, raw_name: &str) -> Result<(), ChatError> {
        let name = ParticipantName::new(raw_name).map_err(ChatError::invalid)?;

        let now = Timestamp::new(self.clock.now_millis());
        let touched = self.participants.touch(&name, now).await?;
        if !touched {
            return Err(ChatError::ParticipantNotFound(name.into_string()));
        }
        Ok(())
    }

    /// All active participants, in no particular order.
    pub async fn list(&self) -> Result<Vec<Participant>, ChatError> {
        Ok(self.participants.list().await?)
    }
}
