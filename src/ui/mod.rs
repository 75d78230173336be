//! HTTP server implementation.

pub mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{router, run_server};
