//! Use case layer.
//!
//! Called from the ui layer; operates on the domain through the store
//! traits.

pub mod ledger;
pub mod presence;
pub mod reaper;

pub use ledger::MessageLedger;
pub use presence::PresenceRegistry;
pub use reaper::{InactivityReaper, ReaperHandle};
