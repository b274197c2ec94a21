use serde::Serialize;
use tokio::sync::broadcast;

use divine_shared::{MatchId, MessageId, ProfileId};

pub const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SessionEvent {
    ItsAMatch {
        match_id: MatchId,
        profile_id: ProfileId,
        name: String,
    },
    DeckReplenished {
        added: usize,
        fallback: bool,
    },
    DecisionUndone {
        profile_id: ProfileId,
        removed_match: Option<MatchId>,
    },
    MessageStored {
        match_id: MatchId,
        message_id: MessageId,
        from_user: bool,
    },
    ComposingChanged {
        match_id: MatchId,
        composing: bool,
    },
    MatchRemoved {
        match_id: MatchId,
    },
}

/// Broadcast an event. Having no subscriber is not an error.
pub fn emit_event(tx: &broadcast::Sender<SessionEvent>, event: SessionEvent) {
    if tx.send(event).is_err() {
        tracing::trace!("No event subscribers");
    }
}
