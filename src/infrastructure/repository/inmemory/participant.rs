//! In-memory `participants` collection.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{Participant, ParticipantName, ParticipantStore, StoreError, Timestamp};

/// In-memory participant store.
#[derive(Debug, Default)]
pub struct InMemoryParticipantStore {
    participants: Arc<Mutex<Vec<Participant>>>,
}

impl InMemoryParticipantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantStore for InMemoryParticipantStore {
    async fn insert_if_absent(&self, participant: Participant) -> Result<bool, StoreError> {
        let mut participants = self.participants.lock().await;
        if participants.iter().any(|p| p.name == participant.name) {
            return Ok(false);
        }
        participants.push(participant);
        Ok(true)
    }

    async fn find_by_name(
        &self,
        name: &ParticipantName,
    ) -> Result<Option<Participant>, StoreError> {
        let participants = self.participants.lock().await;
        Ok(participants.iter().find(|p| &p.name == name).cloned())
    }

    async fn touch(&self, name: &ParticipantName, now: Timestamp) -> Result<bool, StoreError> {
        let mut participants = self.participants.lock().await;
        match participants.iter_mut().find(|p| &p.name == name) {
            Some(p) => {
                p.last_status = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<Participant>, StoreError> {
        let participants = self.participants.lock().await;
        Ok(participants.clone())
    }

    async fn remove_if_older(&self, id: Uuid, cutoff: Timestamp) -> Result<bool, StoreError> {
        let mut participants = self.participants.lock().await;
        // Conditional delete: a heartbeat that landed after the sweep's read
        // bumps last_status past the cutoff and the participant survives.
        match participants
            .iter()
            .position(|p| p.id == id && p.last_status < cutoff)
        {
            Some(index) => {
                participants.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
