//! Contracts of the external content collaborator.
//!
//! The session only ever talks to these traits. Both calls may fail; the
//! session owns the fallbacks (built-in profiles, apology reply).

use async_trait::async_trait;

use divine_shared::{ChatTurn, ContentError, Profile};

/// Source of candidate profiles for the deck.
#[async_trait]
pub trait ProfileSupply: Send + Sync {
    /// Fetch up to `count` candidates, already in deck order.
    async fn fetch(&self, count: usize) -> Result<Vec<Profile>, ContentError>;
}

/// Generates the matched counterpart's reply to a user message.
#[async_trait]
pub trait Responder: Send + Sync {
    /// `history` holds the conversation before `message`, oldest first.
    async fn reply(
        &self,
        message: &str,
        counterpart: &Profile,
        history: &[ChatTurn],
    ) -> Result<String, ContentError>;
}

/// Collaborator used when no content API is configured. Every call fails,
/// so the session runs entirely on its fallbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineContent;

#[async_trait]
impl ProfileSupply for OfflineContent {
    async fn fetch(&self, _count: usize) -> Result<Vec<Profile>, ContentError> {
        Err(ContentError::Unavailable("offline".into()))
    }
}

#[async_trait]
impl Responder for OfflineContent {
    async fn reply(
        &self,
        _message: &str,
        _counterpart: &Profile,
        _history: &[ChatTurn],
    ) -> Result<String, ContentError> {
        Err(ContentError::Unavailable("offline".into()))
    }
}
