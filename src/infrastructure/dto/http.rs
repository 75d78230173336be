//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, Participant};

/// Body of `POST /participants`.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRequest {
    #[serde(default)]
    pub name: String,
}

/// Body returned by a successful join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinedDto {
    pub name: String,
}

/// Participant as returned by `GET /participants`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "lastStatus")]
    pub last_status: i64,
}

impl From<&Participant> for ParticipantDto {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.as_str().to_string(),
            last_status: p.last_status.millis(),
        }
    }
}

/// Body of `POST /messages` and `PUT /messages/{id}`.
///
/// Fields default to empty so validation can report every missing field
/// instead of failing deserialization on the first one.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Message as returned by `GET /messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

impl From<&ChatMessage> for MessageDto {
    fn from(m: &ChatMessage) -> Self {
        Self {
            id: m.id.to_string(),
            from: m.from.as_str().to_string(),
            to: m.to.as_str().to_string(),
            text: m.text.as_str().to_string(),
            kind: m.kind.as_str().to_string(),
            time: m.time.clone(),
        }
    }
}
