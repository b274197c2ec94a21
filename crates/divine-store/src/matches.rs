use chrono::Utc;
use tracing::debug;

use divine_shared::{MatchId, Profile, ProfileId};

use crate::error::{Result, StoreError};
use crate::models::{Match, Message};
use crate::store::ConversationStore;

impl ConversationStore {
    /// Create a match for `profile` at the head of the collection together
    /// with its empty conversation.
    pub fn insert_match(&mut self, profile: Profile) -> Match {
        let now = Utc::now();
        let m = Match {
            id: MatchId::new(),
            profile,
            created_at: now,
            updated_at: now,
            unread_count: 0,
            last_message: None,
        };
        self.conversations.insert(m.id, Vec::new());
        self.matches.insert(0, m.clone());
        debug!(match_id = %m.id, profile = %m.profile.id, "Match inserted");
        m
    }

    /// Remove a match and its entire conversation.
    ///
    /// Returns the removed match and how many messages were dropped.
    pub fn remove_match(&mut self, id: MatchId) -> Option<(Match, usize)> {
        let pos = self.position(id)?;
        let removed = self.matches.remove(pos);
        let dropped = self
            .conversations
            .remove(&id)
            .map(|c| c.len())
            .unwrap_or_default();
        self.composing.remove(&id);
        debug!(match_id = %id, dropped, "Match removed with its conversation");
        Some((removed, dropped))
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub(crate) fn get_match_mut(&mut self, id: MatchId) -> Result<&mut Match> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::MatchNotFound(id))
    }

    pub fn contains(&self, id: MatchId) -> bool {
        self.position(id).is_some()
    }

    /// Matches in collection order (most recently created first).
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Matches ordered for the match list: latest activity first.
    /// Equal timestamps keep collection order.
    pub fn matches_by_recency(&self) -> Vec<&Match> {
        let mut list: Vec<&Match> = self.matches.iter().collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        list
    }

    /// Find the live match with a given counterpart, if any.
    pub fn match_for_profile(&self, profile_id: &ProfileId) -> Option<&Match> {
        self.matches.iter().find(|m| &m.profile.id == profile_id)
    }

    /// Sum of unread counters across all matches (navigation badge).
    pub fn total_unread(&self) -> u32 {
        self.matches.iter().map(|m| m.unread_count).sum()
    }

    /// Reset a match's unread counter. Returns `false` if the match is gone.
    pub fn mark_read(&mut self, id: MatchId) -> bool {
        match self.get_match_mut(id) {
            Ok(m) => {
                m.unread_count = 0;
                true
            }
            Err(_) => false,
        }
    }

    /// Swap in an edited profile for every match with that counterpart.
    ///
    /// Returns the number of matches updated.
    pub fn replace_profile(&mut self, profile: &Profile) -> usize {
        let mut updated = 0;
        for m in self.matches.iter_mut().filter(|m| m.profile.id == profile.id) {
            m.profile = profile.clone();
            updated += 1;
        }
        updated
    }

    /// The conversation of a match, oldest first.
    pub fn conversation(&self, id: MatchId) -> Option<&[Message]> {
        self.conversations.get(&id).map(Vec::as_slice)
    }
}
