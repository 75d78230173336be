//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the default directive when set.
pub fn setup_logger(app_name: &str, default_level: &str) {
    let target = app_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{target}={default_level},batepapo={default_level},tower_http=info"
        ))
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
