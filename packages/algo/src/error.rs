//! Error Types
//!
//! - [`DataIntegrityError`] - malformed vocabulary records or snapshot cards
//! - [`StoreError`] - session persistence failures
//! - [`SessionError`] - misuse of the session driver

use thiserror::Error;

/// A record or persisted card violates the card model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    #[error("record {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index}: field `{field}` is blank")]
    BlankField { index: usize, field: &'static str },

    #[error("record {index}: unknown category `{value}`")]
    UnknownCategory { index: usize, value: String },

    #[error("record {index}: level `{found}` does not match requested level `{expected}`")]
    LevelMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("duplicate card id `{0}`")]
    DuplicateId(String),

    #[error("card `{id}` is inconsistent: {reason}")]
    InconsistentCard { id: String, reason: &'static str },

    #[error("snapshot belongs to level `{found}`, expected `{expected}`")]
    SnapshotLevelMismatch { expected: String, found: String },
}

/// Session store failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    #[error("session read failed: {0}")]
    Read(String),

    #[error("session write failed: {0}")]
    Write(String),

    #[error("session serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Session driver error
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no deck is loaded")]
    NoActiveDeck,

    #[error("no card is currently shown")]
    NoCurrentCard,

    #[error("card `{0}` is not in the active deck")]
    UnknownCard(String),

    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),
}

pub type SessionResult<T> = Result<T, SessionError>;
