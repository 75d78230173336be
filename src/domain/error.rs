//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to value object validation.
///
/// The `Display` strings double as the per-field violation messages returned
/// to clients, so they are phrased for the field they guard.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Participant name empty after sanitization
    #[error("name must be a non-empty string")]
    NameEmpty,

    /// Participant name too long
    #[error("name cannot exceed {max} characters (got {actual})")]
    NameTooLong { max: usize, actual: usize },

    /// Message recipient empty after sanitization
    #[error("to must be a non-empty string")]
    RecipientEmpty,

    /// Message text empty after sanitization
    #[error("text must be a non-empty string")]
    TextEmpty,

    /// Message text too long
    #[error("text cannot exceed {max} characters (got {actual})")]
    TextTooLong { max: usize, actual: usize },

    /// Message type outside the enumerated set
    #[error("type must be one of message, private_message (got: {0})")]
    KindUnknown(String),

    /// `status` is written only by the system on join/leave
    #[error("type status is reserved for system messages")]
    KindReserved,

    /// Sender header missing from the request
    #[error("from must be a non-empty string")]
    SenderMissing,
}

/// Failure of the underlying document store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Request-level error taxonomy shared by all operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// One or more input constraints violated; every violation is reported.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Participant name already registered
    #[error("name '{0}' is already in use")]
    NameTaken(String),

    /// No active participant with that name
    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),

    /// No message with that id
    #[error("message '{0}' not found")]
    MessageNotFound(String),

    /// Requester does not own the message
    #[error("message is not owned by '{0}'")]
    NotOwner(String),

    /// Message sender is not an active participant
    #[error("sender '{0}' is not in the room")]
    UnknownSender(String),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ChatError {
    /// Wrap a single value object violation as a validation failure.
    pub fn invalid(error: ValueObjectError) -> Self {
        Self::Validation(vec![error.to_string()])
    }
}
