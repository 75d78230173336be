//! Domain layer for the chat room.
//!
//! Business rules independent of transport and storage: entities, validated
//! value objects, the error taxonomy, and the store traits the use cases
//! depend on.

pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use entity::{BROADCAST, ChatMessage, Participant};
pub use error::{ChatError, StoreError, ValueObjectError};
pub use repository::{MessageStore, ParticipantStore};
pub use value_object::{MessageKind, MessageText, ParticipantName, Timestamp, sanitize};
