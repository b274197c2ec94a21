use chrono::Utc;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use divine_shared::constants::{EMPTY_REPLY_PLACEHOLDER, RESPONDER_APOLOGY};
use divine_shared::{MatchId, Profile, ProfileId, Screen, SenderId};
use divine_store::{Match, Message, Result};

use crate::events::{emit_event, SessionEvent};
use crate::notifications::{should_notify, Alert};
use crate::persistence::{ProfileReport, ReportReason};
use crate::session::Session;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummaryDto {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub photo_url: Option<String>,
    pub last_message: Option<String>,
    pub unread_count: u32,
    pub updated_at: String,
}

impl From<&Match> for MatchSummaryDto {
    fn from(m: &Match) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.profile.name.clone(),
            age: m.profile.age,
            photo_url: m.profile.primary_photo_url().map(str::to_string),
            last_message: m.last_message.clone(),
            unread_count: m.unread_count,
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

/// A stored user message and the responder call it started.
#[derive(Debug)]
pub struct PendingReply {
    pub message: Message,
    handle: JoinHandle<Option<Message>>,
}

impl PendingReply {
    /// Wait for the counterpart's reply. `None` if it was dropped because
    /// the match no longer exists.
    pub async fn reply(self) -> Option<Message> {
        match self.handle.await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Reply task failed");
                None
            }
        }
    }
}

impl Session {
    /// All matches, most recently active first.
    pub fn matches(&self) -> Vec<Match> {
        self.lock()
            .store
            .matches_by_recency()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn match_summaries(&self) -> Vec<MatchSummaryDto> {
        self.matches().iter().map(MatchSummaryDto::from).collect()
    }

    pub fn get_match(&self, match_id: MatchId) -> Option<Match> {
        self.lock().store.get_match(match_id).cloned()
    }

    pub fn conversation(&self, match_id: MatchId) -> Option<Vec<Message>> {
        self.lock().store.conversation(match_id).map(<[Message]>::to_vec)
    }

    /// Navigation badge: unread messages across all matches.
    pub fn total_unread(&self) -> u32 {
        self.lock().store.total_unread()
    }

    pub fn is_composing(&self, match_id: MatchId) -> bool {
        self.lock().store.is_composing(match_id)
    }

    /// Show a match's conversation and clear its unread count.
    pub fn open_conversation(&self, match_id: MatchId) -> bool {
        let mut state = self.lock();
        if !state.store.mark_read(match_id) {
            return false;
        }
        state.view.screen = Screen::Chat;
        state.view.active_match = Some(match_id);
        debug!(match_id = %match_id, "Conversation opened");
        true
    }

    /// Leave the conversation screen for the match list.
    pub fn close_conversation(&self) {
        let mut state = self.lock();
        state.view.screen = Screen::Matches;
        state.view.active_match = None;
    }

    /// Store a user message, then ask the responder for the counterpart's
    /// reply in the background.
    ///
    /// Blank text is rejected before anything is stored.
    pub fn send_message(&self, match_id: MatchId, text: &str) -> Result<PendingReply> {
        let (message, counterpart, history, composing_started) = {
            let mut state = self.lock();
            let history = state.store.history(match_id).unwrap_or_default();
            let in_foreground = state.view.is_foreground(match_id);
            let message =
                state
                    .store
                    .append_message(match_id, SenderId::SessionUser, text, in_foreground)?;
            let counterpart = state
                .store
                .get_match(match_id)
                .map(|m| m.profile.clone())
                .ok_or(divine_store::StoreError::MatchNotFound(match_id))?;
            let composing_started = state.store.begin_composing(match_id);
            (message, counterpart, history, composing_started)
        };

        info!(msg_id = %message.id, match_id = %match_id, "Message sent");
        self.persistence.message_stored(&message);
        emit_event(
            &self.events,
            SessionEvent::MessageStored {
                match_id,
                message_id: message.id,
                from_user: true,
            },
        );
        if composing_started {
            emit_event(
                &self.events,
                SessionEvent::ComposingChanged {
                    match_id,
                    composing: true,
                },
            );
        }

        let session = self.clone();
        let text = message.text.clone();
        let handle = tokio::spawn(async move {
            session
                .await_reply(match_id, text, counterpart, history)
                .await
        });

        Ok(PendingReply { message, handle })
    }

    async fn await_reply(
        &self,
        match_id: MatchId,
        text: String,
        counterpart: Profile,
        history: Vec<divine_shared::ChatTurn>,
    ) -> Option<Message> {
        let reply = match self.responder.reply(&text, &counterpart, &history).await {
            Ok(reply) if reply.trim().is_empty() => EMPTY_REPLY_PLACEHOLDER.to_string(),
            Ok(reply) => reply,
            Err(e) => {
                warn!(match_id = %match_id, error = %e, "Responder failed, storing apology");
                RESPONDER_APOLOGY.to_string()
            }
        };

        // Re-read everything: the match may be gone, its profile replaced,
        // or the conversation opened while the reply was in flight.
        let (stored, composing_cleared, alert) = {
            let mut state = self.lock();
            let composing_cleared = state.store.end_composing(match_id);

            let Some(profile) = state.store.get_match(match_id).map(|m| m.profile.clone()) else {
                debug!(match_id = %match_id, "Match gone, dropping reply");
                return None;
            };

            let sender = SenderId::Counterpart(profile.id.clone());
            let in_foreground = state.view.is_foreground(match_id);
            let stored = match state
                .store
                .append_message(match_id, sender.clone(), reply, in_foreground)
            {
                Ok(message) => message,
                Err(e) => {
                    debug!(match_id = %match_id, error = %e, "Reply not stored");
                    return None;
                }
            };

            let alert = should_notify(&sender, match_id, &state.view).then(|| {
                Alert::for_message(
                    Some(profile.name.as_str()),
                    &stored.text,
                    profile.primary_photo_url(),
                )
            });
            (stored, composing_cleared, alert)
        };

        debug!(msg_id = %stored.id, match_id = %match_id, "Reply stored");
        self.persistence.message_stored(&stored);
        if composing_cleared {
            emit_event(
                &self.events,
                SessionEvent::ComposingChanged {
                    match_id,
                    composing: false,
                },
            );
        }
        emit_event(
            &self.events,
            SessionEvent::MessageStored {
                match_id,
                message_id: stored.id,
                from_user: false,
            },
        );

        if let Some(alert) = alert {
            self.notifier.dispatch(match_id, &alert);
        }

        Some(stored)
    }

    /// Swap a profile wholesale in every match and queued card that holds it.
    /// In-flight replies pick up the new record.
    pub fn replace_profile(&self, profile: Profile) -> usize {
        let mut state = self.lock();
        let in_matches = state.store.replace_profile(&profile);
        let in_deck = state.deck.replace_profile(&profile);
        info!(profile = %profile.id, in_matches, in_deck, "Profile replaced");
        in_matches + usize::from(in_deck)
    }

    /// Forward a profile report to the persistence sink.
    pub fn report_profile(
        &self,
        profile_id: ProfileId,
        reason: ReportReason,
        details: Option<String>,
    ) -> ProfileReport {
        let report = ProfileReport {
            profile_id,
            reason,
            details: details.filter(|d| !d.trim().is_empty()),
            reported_at: Utc::now(),
        };
        info!(profile = %report.profile_id, reason = %report.reason, "Profile reported");
        self.persistence.profile_reported(&report);
        report
    }
}
