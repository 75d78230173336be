//! Test fixtures for HTTP API integration tests.

use std::time::Duration;

use batepapo::config::ServerConfig;
use batepapo::run_server;

/// A chat server running on its own port inside the test runtime.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Start a server with production-like reaper settings (effectively
    /// inert for short tests).
    pub async fn start(port: u16) -> Self {
        Self::start_with(ServerConfig {
            port,
            inactive_timeout_secs: 60,
            reaper_interval_secs: 60,
        })
        .await
    }

    /// Start a server with custom presence settings.
    pub async fn start_with(config: ServerConfig) -> Self {
        let port = config.port;
        tokio::spawn(async move {
            if let Err(e) = run_server(config).await {
                panic!("test server failed to start: {e}");
            }
        });

        let server = Self { port };
        server.wait_until_ready().await;
        server
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    async fn wait_until_ready(&self) {
        let addr = format!("127.0.0.1:{}", self.port);
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(&addr).await.is_ok() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("test server on port {} never became ready", self.port);
    }
}
