//! Store trait implementations.
//!
//! Use cases depend on the traits in the domain layer, never on these types
//! directly (dependency inversion).

pub mod inmemory;

pub use inmemory::{InMemoryMessageStore, InMemoryParticipantStore};
