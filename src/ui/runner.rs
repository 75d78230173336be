//! Server startup: wire the stores, spawn the reaper, serve the router.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::infrastructure::repository::{InMemoryMessageStore, InMemoryParticipantStore};
use crate::time::SystemClock;
use crate::ui::handler::{
    delete_message, edit_message, get_messages, get_participants, health_check, heartbeat,
    join_room, post_message,
};
use crate::ui::signal::shutdown_signal;
use crate::ui::state::AppState;
use crate::usecase::InactivityReaper;

/// Build the application router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/participants", post(join_room).get(get_participants))
        .route("/messages", post(post_message).get(get_messages))
        .route("/messages/{id}", delete(delete_message).put(edit_message))
        .route("/status", post(heartbeat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the stores, start the reaper, and serve until shutdown.
pub async fn run_server(config: ServerConfig) -> Result<(), std::io::Error> {
    let participants = Arc::new(InMemoryParticipantStore::new());
    let messages = Arc::new(InMemoryMessageStore::new());
    let clock = Arc::new(SystemClock);

    let reaper = InactivityReaper::new(
        participants.clone(),
        messages.clone(),
        clock.clone(),
        config.inactive_timeout(),
        config.reaper_interval(),
    );
    let reaper_handle = reaper.spawn();

    let state = Arc::new(AppState::new(participants, messages, clock));
    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        inactive_timeout_secs = config.inactive_timeout_secs,
        reaper_interval_secs = config.reaper_interval_secs,
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    reaper_handle.stop().await;
    Ok(())
}
