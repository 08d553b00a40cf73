//! Error types shared by the core and both front ends

use thiserror::Error;

/// Errors raised while talking to the server or local storage.
///
/// None of these are fatal to the dashboard; callers log and carry on.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid notification JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("history request failed: {0}")]
    History(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("STOMP error: {0}")]
    Stomp(#[from] StompError),

    #[error("preference storage error: {0}")]
    Storage(String),
}

/// Frame-level STOMP failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StompError {
    #[error("frame has no command line")]
    MissingCommand,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("malformed header line `{0}`")]
    MalformedHeader(String),

    #[error("invalid escape sequence in header `{0}`")]
    InvalidEscape(String),

    #[error("frame body is not NUL terminated")]
    Unterminated,

    #[error("server rejected session: {0}")]
    Rejected(String),
}
