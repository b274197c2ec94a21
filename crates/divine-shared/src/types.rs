use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::SESSION_USER_ID;
use crate::profile::Profile;

// Candidate identity as issued by the profile supply (opaque string)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId(pub String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a short random id (9 lowercase hex chars).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string()[..9].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MatchId(pub Uuid);

impl MatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author of a stored message: the session user or a matched counterpart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SenderId {
    SessionUser,
    Counterpart(ProfileId),
}

impl SenderId {
    pub fn is_session_user(&self) -> bool {
        matches!(self, Self::SessionUser)
    }
}

impl std::fmt::Display for SenderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionUser => f.write_str(SESSION_USER_ID),
            Self::Counterpart(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Swipe right.
    Accept,
    /// Swipe left.
    Reject,
}

impl Direction {
    /// Direction implied by the sign of a horizontal offset. Zero has none.
    pub fn from_offset(dx: f32) -> Option<Self> {
        if dx > 0.0 {
            Some(Self::Accept)
        } else if dx < 0.0 {
            Some(Self::Reject)
        } else {
            None
        }
    }

    /// Signed unit used to drive the card off-screen.
    pub fn sign(self) -> f32 {
        match self {
            Self::Accept => 1.0,
            Self::Reject => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "right",
            Self::Reject => "left",
        }
    }
}

/// One completed swipe. Consumed by the match engine, one copy kept for undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeDecision {
    pub profile: Profile,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// Provider-neutral history entry handed to the responder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Top-level screen the session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Swipe,
    Matches,
    Chat,
}
