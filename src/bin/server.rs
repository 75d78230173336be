//! Room chat REST API server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin batepapo-server
//! ```

use clap::Parser;

use batepapo::config::ServerConfig;
use batepapo::logger::setup_logger;

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::parse();

    if let Err(e) = batepapo::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
