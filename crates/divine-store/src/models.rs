//! Domain model structs held by the conversation store.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! to a presentation layer or a persistence collaborator as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use divine_shared::{MatchId, MessageId, Profile, SenderId};

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A pairing created by a winning accept decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Match {
    /// Unique match identifier; also keys the conversation.
    pub id: MatchId,
    /// The matched counterpart. Replaced wholesale on edit.
    pub profile: Profile,
    /// When the match was created.
    pub created_at: DateTime<Utc>,
    /// Ordering key for the match list: creation time, bumped by every
    /// stored message.
    pub updated_at: DateTime<Utc>,
    /// Counterpart messages stored while the conversation was not in the
    /// foreground.
    pub unread_count: u32,
    /// Text of the most recent message, if any.
    pub last_message: Option<String>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single chat message. Never mutated once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// The match whose conversation holds this message.
    pub match_id: MatchId,
    /// Session user or counterpart.
    pub sender: SenderId,
    /// Message body.
    pub text: String,
    /// Append time, non-decreasing within a conversation.
    pub timestamp: DateTime<Utc>,
}
