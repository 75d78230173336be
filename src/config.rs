//! Server configuration.
//!
//! All knobs are environment-supplied with CLI overrides: listening port,
//! how long a participant may stay silent before eviction, and how often the
//! reaper sweeps.

use std::time::Duration;

use clap::Parser;

/// Runtime configuration for the chat server.
#[derive(Debug, Clone, Parser)]
#[command(name = "batepapo-server", about = "Room chat REST API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Seconds of silence after which a participant is evicted.
    #[arg(long, env = "INACTIVE_TIMEOUT", default_value_t = 10)]
    pub inactive_timeout_secs: u64,

    /// Seconds between reaper sweeps.
    #[arg(long, env = "REAPER_INTERVAL", default_value_t = 15)]
    pub reaper_interval_secs: u64,
}

impl ServerConfig {
    pub fn inactive_timeout(&self) -> Duration {
        Duration::from_secs(self.inactive_timeout_secs)
    }

    pub fn reaper_interval(&self) -> Duration {
        Duration::from_secs(self.reaper_interval_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            inactive_timeout_secs: 10,
            reaper_interval_secs: 15,
        }
    }
}
