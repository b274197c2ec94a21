//! Fire-and-forget persistence collaborator and profile reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use divine_shared::{MatchId, ProfileId};
use divine_store::{Match, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportReason {
    FakeProfile,
    InappropriateContent,
    Harassment,
    ScamOrSpam,
    Underage,
    Other,
}

impl ReportReason {
    pub const ALL: [ReportReason; 6] = [
        Self::FakeProfile,
        Self::InappropriateContent,
        Self::Harassment,
        Self::ScamOrSpam,
        Self::Underage,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FakeProfile => "Fake Profile",
            Self::InappropriateContent => "Inappropriate Content",
            Self::Harassment => "Harassment",
            Self::ScamOrSpam => "Scam / Spam",
            Self::Underage => "Underage",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ReportReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ReportReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown report reason: {wanted}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    pub profile_id: ProfileId,
    pub reason: ReportReason,
    pub details: Option<String>,
    pub reported_at: DateTime<Utc>,
}

/// Durable storage sink. Calls carry no acknowledgment.
pub trait PersistenceSink: Send + Sync {
    fn match_created(&self, m: &Match);
    fn match_removed(&self, match_id: MatchId);
    fn message_stored(&self, message: &Message);
    fn profile_reported(&self, report: &ProfileReport);
}

/// Sink that drops everything after a debug log.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPersistence;

impl PersistenceSink for NoPersistence {
    fn match_created(&self, m: &Match) {
        debug!(match_id = %m.id, "Persistence disabled, match not saved");
    }

    fn match_removed(&self, match_id: MatchId) {
        debug!(match_id = %match_id, "Persistence disabled, removal not saved");
    }

    fn message_stored(&self, message: &Message) {
        debug!(msg_id = %message.id, "Persistence disabled, message not saved");
    }

    fn profile_reported(&self, report: &ProfileReport) {
        debug!(profile = %report.profile_id, reason = %report.reason, "Persistence disabled, report not saved");
    }
}
