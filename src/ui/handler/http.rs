//! HTTP API endpoint handlers.
//!
//! Thin layer: pull the `user` header and body apart, call the use case,
//! map the error taxonomy onto status codes.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::ChatError;
use crate::infrastructure::dto::http::{
    JoinRequest, JoinedDto, MessageDto, ParticipantDto, PostMessageRequest,
};
use crate::ui::state::AppState;

/// ChatError wrapper carrying the HTTP status mapping.
pub struct ApiError(ChatError);

impl From<ChatError> for ApiError {
    fn from(error: ChatError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            // All violated constraints go to the client, not just the first.
            ChatError::Validation(violations) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(violations)).into_response()
            }
            e @ ChatError::NameTaken(_) => (StatusCode::CONFLICT, e.to_string()).into_response(),
            e @ (ChatError::ParticipantNotFound(_) | ChatError::MessageNotFound(_)) => {
                (StatusCode::NOT_FOUND, e.to_string()).into_response()
            }
            e @ ChatError::NotOwner(_) => {
                (StatusCode::UNAUTHORIZED, e.to_string()).into_response()
            }
            e @ ChatError::UnknownSender(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
            }
            ChatError::Store(e) => {
                tracing::error!(error = %e, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "store failure".to_string()).into_response()
            }
        }
    }
}

/// The unauthenticated identity header.
fn user_header(headers: &HeaderMap) -> Option<&str> {
    headers.get("user").and_then(|v| v.to_str().ok())
}

/// Query parameters for `GET /messages`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Raw string so a malformed value means "no limit" instead of a 400.
    pub limit: Option<String>,
}

impl ListQuery {
    fn parsed_limit(&self) -> Option<i64> {
        self.limit.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /participants`
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Json(body): Json<JoinRequest>,
) -> Result<(StatusCode, Json<JoinedDto>), ApiError> {
    let participant = state.registry().join(&body.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(JoinedDto {
            name: participant.name.into_string(),
        }),
    ))
}

/// `GET /participants`
pub async fn get_participants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ParticipantDto>>, ApiError> {
    let participants = state.registry().list().await?;
    Ok(Json(participants.iter().map(ParticipantDto::from).collect()))
}

/// `POST /status`
pub async fn heartbeat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let user = user_header(&headers).unwrap_or_default();
    state.registry().heartbeat(user).await?;
    Ok(StatusCode::OK)
}

/// `POST /messages`
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<PostMessageRequest>,
) -> Result<StatusCode, ApiError> {
    let from = user_header(&headers);
    state
        .ledger()
        .post(from, &body.to, &body.text, &body.kind)
        .await?;
    Ok(StatusCode::CREATED)
}

/// `GET /messages?limit=N`
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let reader = user_header(&headers).unwrap_or_default();
    let visible = state.ledger().list(reader, query.parsed_limit()).await?;
    Ok(Json(visible.iter().map(MessageDto::from).collect()))
}

/// `DELETE /messages/{id}`
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let message_id = parse_message_id(&id)?;
    let requester = user_header(&headers).unwrap_or_default();
    state.ledger().delete_own(message_id, requester).await?;
    Ok(StatusCode::OK)
}

/// `PUT /messages/{id}`
pub async fn edit_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<PostMessageRequest>,
) -> Result<StatusCode, ApiError> {
    let message_id = parse_message_id(&id)?;
    let editor = user_header(&headers);
    state
        .ledger()
        .edit_own(message_id, editor, &body.to, &body.text, &body.kind)
        .await?;
    Ok(StatusCode::OK)
}

/// A malformed id cannot name any message, so it reads as not-found.
fn parse_message_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ChatError::MessageNotFound(raw.to_string()).into())
}
