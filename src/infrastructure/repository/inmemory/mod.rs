//! In-memory document store.
//!
//! Each collection lives behind one `tokio::sync::Mutex`; every trait method
//! acquires the lock exactly once, so each operation is atomic with respect
//! to the others. That is the contract the presence rules rely on
//! (insert-if-absent, atomic touch, conditional delete). A document database
//! adapter would implement the same traits with its native atomic operators.

mod message;
mod participant;

pub use message::InMemoryMessageStore;
pub use participant::InMemoryParticipantStore;
