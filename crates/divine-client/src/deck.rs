//! The deck: ordered queue of candidates awaiting a decision.
//!
//! Front is the active card. Profiles decided this session, and profiles
//! already queued, are filtered out of incoming batches.

use std::collections::{HashSet, VecDeque};

use divine_shared::{Profile, ProfileId};

#[derive(Debug, Default)]
pub struct Deck {
    queue: VecDeque<Profile>,
    decided: HashSet<ProfileId>,
    replenishing: bool,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active candidate.
    pub fn current(&self) -> Option<&Profile> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.queue.iter()
    }

    /// Pop the front card and remember it as decided. `None` on an empty deck.
    pub fn decide(&mut self) -> Option<Profile> {
        let profile = self.queue.pop_front()?;
        self.decided.insert(profile.id.clone());
        Some(profile)
    }

    /// Put an undone profile back in front and forget its decision.
    pub fn reinsert_front(&mut self, profile: Profile) {
        self.decided.remove(&profile.id);
        self.queue.retain(|p| p.id != profile.id);
        self.queue.push_front(profile);
    }

    pub fn is_replenishing(&self) -> bool {
        self.replenishing
    }

    /// Claim the in-flight slot. Returns `false` if a fetch is already running.
    pub fn begin_replenish(&mut self) -> bool {
        if self.replenishing {
            return false;
        }
        self.replenishing = true;
        true
    }

    /// Append a fetched batch in supply order, dropping profiles that were
    /// decided or are already queued, and release the in-flight slot.
    ///
    /// Returns how many profiles were added.
    pub fn finish_replenish(&mut self, batch: Vec<Profile>) -> usize {
        self.replenishing = false;
        let mut added = 0;
        for profile in batch {
            if self.decided.contains(&profile.id) || self.queue.iter().any(|p| p.id == profile.id)
            {
                continue;
            }
            self.queue.push_back(profile);
            added += 1;
        }
        added
    }

    /// Append the built-in profiles after a supply failure.
    ///
    /// Filtered like any batch, except that when nothing survives and the
    /// deck is empty the whole set is offered again, decided or not.
    pub fn finish_fallback(&mut self, fallback: Vec<Profile>) -> usize {
        let added = self.finish_replenish(fallback.clone());
        if added > 0 || !self.queue.is_empty() {
            return added;
        }
        for profile in &fallback {
            self.decided.remove(&profile.id);
        }
        self.finish_replenish(fallback)
    }

    /// Swap a queued copy of `profile` wholesale. Returns `true` if one was queued.
    pub fn replace_profile(&mut self, profile: &Profile) -> bool {
        match self.queue.iter_mut().find(|p| p.id == profile.id) {
            Some(slot) => {
                *slot = profile.clone();
                true
            }
            None => false,
        }
    }
}
