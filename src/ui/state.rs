//! Shared application state.

use std::sync::Arc;

use crate::domain::{MessageStore, ParticipantStore};
use crate::time::Clock;
use crate::usecase::{MessageLedger, PresenceRegistry};

/// Shared application state handed to every handler.
///
/// Holds the store handles and the clock; handlers build the use cases they
/// need from these.
pub struct AppState {
    pub participants: Arc<dyn ParticipantStore>,
    pub messages: Arc<dyn MessageStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
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

    pub fn registry(&self) -> PresenceRegistry {
        PresenceRegistry::new(
            self.participants.clone(),
            self.messages.clone(),
            self.clock.clone(),
        )
    }

    pub fn ledger(&self) -> MessageLedger {
        MessageLedger::new(
            self.messages.clone(),
            self.participants.clone(),
            self.clock.clone(),
        )
    }
}
