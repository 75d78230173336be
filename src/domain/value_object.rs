//! Value objects for domain models.
//!
//! Value objects are immutable and compared by value. All untrusted text
//! passes through [`sanitize`] before validation, so markup never reaches
//! storage or name comparison.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Strip embedded markup and surrounding whitespace from untrusted input.
///
/// Everything between `<` and the matching `>` is dropped; a `<` with no
/// closing `>` is kept literally.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Unique participant identity, also used as message endpoints (`from`/`to`).
///
/// Holds the sanitized form; equality is exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Sanitize and validate a raw name.
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let name = sanitize(raw);
        if name.is_empty() {
            return Err(ValueObjectError::NameEmpty);
        }
        let len = name.chars().count();
        if len > 100 {
            return Err(ValueObjectError::NameTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Sanitize and validate a message recipient.
    ///
    /// Same rules as a name, but empty input reports the `to` field.
    pub fn recipient(raw: &str) -> Result<Self, ValueObjectError> {
        Self::new(raw).map_err(|e| match e {
            ValueObjectError::NameEmpty => ValueObjectError::RecipientEmpty,
            other => other,
        })
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for ParticipantName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Message body with sanitization and length validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let text = sanitize(raw);
        if text.is_empty() {
            return Err(ValueObjectError::TextEmpty);
        }
        let len = text.chars().count();
        if len > 10_000 {
            return Err(ValueObjectError::TextTooLong {
                max: 10_000,
                actual: len,
            });
        }
        Ok(Self(text))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Enumerated message types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Public message, visible to every reader
    Message,
    /// Private message, visible to its two endpoints
    PrivateMessage,
    /// System-synthesized join/leave notification
    Status,
}

impl MessageKind {
    /// Parse a client-supplied type.
    ///
    /// `status` is reserved for system-synthesized messages and is rejected
    /// here along with anything outside the enumerated set.
    pub fn parse_client(raw: &str) -> Result<Self, ValueObjectError> {
        match sanitize(raw).as_str() {
            "message" => Ok(Self::Message),
            "private_message" => Ok(Self::PrivateMessage),
            "status" => Err(ValueObjectError::KindReserved),
            other => Err(ValueObjectError::KindUnknown(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Message => "message",
            Self::PrivateMessage => "private_message",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unix timestamp in milliseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn millis(&self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed from `self` to `now`.
    pub fn elapsed(&self, now: Timestamp) -> i64 {
        now.0 - self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
