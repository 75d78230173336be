//! Store traits the use cases depend on (dependency inversion).
//!
//! Correctness of the presence rules relies on each method being a single
//! atomic store operation: uniqueness comes from `insert_if_absent`,
//! heartbeats from `touch`, and eviction from `remove_if_older` (a
//! conditional delete that loses to a racing heartbeat). None of the
//! implementations may be read-then-write.

use async_trait::async_trait;
use uuid::Uuid;

use super::entity::{ChatMessage, Participant};
use super::error::StoreError;
use super::value_object::{ParticipantName, Timestamp};

/// The `participants` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    /// Insert the participant unless its name is already present.
    ///
    /// Returns `false` when the name is taken (nothing inserted).
    async fn insert_if_absent(&self, participant: Participant) -> Result<bool, StoreError>;

    async fn find_by_name(
        &self,
        name: &ParticipantName,
    ) -> Result<Option<Participant>, StoreError>;

    /// Atomically set `last_status = now`. Returns `false` if absent.
    async fn touch(&self, name: &ParticipantName, now: Timestamp) -> Result<bool, StoreError>;

    async fn list(&self) -> Result<Vec<Participant>, StoreError>;

    /// Delete the participant only if its stored `last_status` is still
    /// strictly older than `cutoff`. Returns `true` when a row was deleted.
    async fn remove_if_older(&self, id: Uuid, cutoff: Timestamp) -> Result<bool, StoreError>;
}

/// The `messages` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert(&self, message: ChatMessage) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatMessage>, StoreError>;

    /// Filtered find: all messages visible to `reader`, in insertion order.
    async fn visible_to(&self, reader: &str) -> Result<Vec<ChatMessage>, StoreError>;

    /// Replace the message with the same id. Returns `false` if absent.
    async fn replace(&self, message: ChatMessage) -> Result<bool, StoreError>;

    /// Delete by id. Returns `false` if absent.
    async fn remove(&self, id: Uuid) -> Result<bool, StoreError>;
}
