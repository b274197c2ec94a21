use divine_shared::MatchId;
use thiserror::Error;

/// Errors produced by the conversation store.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The match does not exist (never created, or removed by undo).
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// Message text was empty after trimming.
    #[error("Message text is empty")]
    EmptyMessage,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
