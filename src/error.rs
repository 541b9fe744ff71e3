//! Error types for the sandbox crate

use thiserror::Error;

/// Main error type for the sandbox crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: position {position} is already occupied")]
    InvalidMove { position: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("no valid moves available")]
    NoValidMoves,

    /// A policy proposed an occupied cell. This is a broken policy, not a game event.
    #[error("policy '{policy}' attempted illegal move at position {position} in state '{state}'")]
    IllegalMoveAttempted {
        policy: String,
        position: usize,
        state: String,
    },

    #[error("episode stopped before reaching a terminal state")]
    EpisodeUnfinished,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid board key '{key}': {reason}")]
    InvalidBoardKey { key: String, reason: String },

    #[error("action {action} is out of range for a {arms}-armed bandit")]
    InvalidAction { action: usize, arms: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for an [`Error::InvalidConfiguration`].
    pub fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}
