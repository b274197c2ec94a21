//! Single-level undo slot.

use divine_shared::{MatchId, Profile};

/// The last decision: the swiped profile and the match it created, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUndo {
    pub profile: Profile,
    pub match_id: Option<MatchId>,
}

#[derive(Debug, Default)]
pub struct UndoSlot {
    pending: Option<PendingUndo>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with the latest decision.
    pub fn record(&mut self, profile: Profile, match_id: Option<MatchId>) {
        self.pending = Some(PendingUndo { profile, match_id });
    }

    pub fn can_undo(&self) -> bool {
        self.pending.is_some()
    }

    pub fn peek(&self) -> Option<&PendingUndo> {
        self.pending.as_ref()
    }

    /// Empty the slot, returning what it held.
    pub fn take(&mut self) -> Option<PendingUndo> {
        self.pending.take()
    }
}
