//! The in-memory conversation store.
//!
//! [`ConversationStore`] owns the match collection, one append-only
//! conversation per match and the per-match composing indicators. A match
//! and its conversation are always inserted and removed together; the CRUD
//! helpers live in [`crate::matches`] and [`crate::messages`].

use std::collections::HashMap;

use divine_shared::MatchId;

use crate::models::{Match, Message};

/// Session-lifetime store for matches and their conversations.
#[derive(Debug, Default)]
pub struct ConversationStore {
    /// Head is the most recently created match.
    pub(crate) matches: Vec<Match>,
    pub(crate) conversations: HashMap<MatchId, Vec<Message>>,
    /// Outstanding responder calls per match; absent means zero.
    pub(crate) composing: HashMap<MatchId, u32>,
}

impl ConversationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub(crate) fn position(&self, id: MatchId) -> Option<usize> {
        self.matches.iter().position(|m| m.id == id)
    }
}
