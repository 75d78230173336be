//! Room chat REST API library.
//!
//! Participants join a shared room by name, post public and private
//! messages, and keep themselves alive with heartbeats; a background reaper
//! evicts participants that stop sending them.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod time;
pub mod ui;
pub mod usecase;

// Re-export entry point
pub use ui::run_server;
