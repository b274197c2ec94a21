use thiserror::Error;

/// Failures of the external content collaborator (profile supply, responder).
///
/// The session never surfaces these to the user; each call site has a fixed
/// fallback.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content API key missing")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Content API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed content response: {0}")]
    Decode(String),

    #[error("Content API returned no candidates")]
    EmptyResponse,

    #[error("Content collaborator unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for ContentError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Failures while presenting a user-visible alert.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification backend unavailable: {0}")]
    Unavailable(String),

    #[error("Notification rejected: {0}")]
    Rejected(String),
}
