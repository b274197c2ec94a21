//! Deck, gesture, match and undo operations.

use tracing::{debug, info};

use divine_shared::fallback::fallback_profiles;
use divine_shared::{Direction, Profile, SwipeDecision};
use divine_store::Match;

use crate::events::{emit_event, SessionEvent};
use crate::gesture::{CardPose, Release};
use crate::session::Session;
use crate::state::SessionState;
use crate::undo::PendingUndo;

/// Result of a gesture release or a programmatic swipe.
#[derive(Debug, Clone, PartialEq)]
pub enum SwipeOutcome {
    /// Rejected: no active card, not dragging, or a card is still settling.
    Ignored,
    /// Released under the commit distance.
    SnappedBack,
    Decided {
        decision: SwipeDecision,
        matched: Option<Match>,
    },
}

impl SwipeOutcome {
    pub fn matched(&self) -> Option<&Match> {
        match self {
            Self::Decided { matched, .. } => matched.as_ref(),
            _ => None,
        }
    }
}

impl Session {
    /// The active candidate. An empty deck starts a background replenishment.
    pub fn current_profile(&self) -> Option<Profile> {
        let mut state = self.lock();
        self.restock_if_empty(&mut state);
        state.deck.current().cloned()
    }

    pub fn deck_len(&self) -> usize {
        self.lock().deck.len()
    }

    pub fn card_pose(&self) -> CardPose {
        self.lock().gesture.pose()
    }

    pub fn is_settling(&self) -> bool {
        self.lock().gesture.is_settling()
    }

    pub fn can_undo(&self) -> bool {
        self.lock().undo.can_undo()
    }

    /// Fetch a batch from the profile supply and append it to the deck.
    ///
    /// Serialized by the in-flight guard: returns 0 without fetching if a
    /// replenishment is already running. A supply failure falls back to the
    /// built-in profiles. Returns how many profiles were added.
    pub async fn replenish(&self) -> usize {
        let count = {
            let mut state = self.lock();
            if !state.deck.begin_replenish() {
                debug!("Replenishment already in flight");
                return 0;
            }
            state.engine.policy().deck_batch_size
        };
        self.fill(count).await
    }

    /// Fetch and append with the in-flight slot already claimed.
    async fn fill(&self, count: usize) -> usize {
        let (batch, fallback) = match self.supply.fetch(count).await {
            Ok(batch) => (batch, false),
            Err(e) => {
                tracing::warn!(error = %e, "Profile supply failed, using built-in profiles");
                (fallback_profiles(), true)
            }
        };

        let (added, deck_len) = {
            let mut state = self.lock();
            let added = if fallback {
                state.deck.finish_fallback(batch)
            } else {
                state.deck.finish_replenish(batch)
            };
            (added, state.deck.len())
        };

        info!(added, fallback, deck_len, "Deck replenished");
        emit_event(&self.events, SessionEvent::DeckReplenished { added, fallback });
        added
    }

    /// Spawn a replenishment if the deck is empty and none is in flight.
    ///
    /// Needs a Tokio runtime; outside one the deck is left as is.
    fn restock_if_empty(&self, state: &mut SessionState) -> bool {
        if !state.deck.is_empty() || state.deck.is_replenishing() {
            return false;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("No runtime, skipping automatic replenishment");
            return false;
        };
        state.deck.begin_replenish();
        let count = state.engine.policy().deck_batch_size;
        let session = self.clone();
        runtime.spawn(async move {
            session.fill(count).await;
        });
        debug!(count, "Deck empty, replenishing");
        true
    }

    /// Manual reload: request a batch even if the deck is not empty.
    pub async fn refresh(&self) -> usize {
        self.replenish().await
    }

    /// Begin dragging the active card. Rejected with no card or while settling.
    pub fn start_gesture(&self) -> bool {
        let mut state = self.lock();
        if state.deck.current().is_none() {
            self.restock_if_empty(&mut state);
            return false;
        }
        state.gesture.start()
    }

    /// Update the drag offset. `None` when no drag is in progress.
    pub fn drag_to(&self, dx: f32) -> Option<CardPose> {
        let mut state = self.lock();
        state.gesture.drag_to(dx).then(|| state.gesture.pose())
    }

    /// Release the drag. A commit resolves after the settle delay.
    pub async fn end_gesture(&self) -> SwipeOutcome {
        let release = self.lock().gesture.release();
        match release {
            Release::Ignored => SwipeOutcome::Ignored,
            Release::SnapBack => SwipeOutcome::SnappedBack,
            Release::Commit(direction) => {
                debug!(direction = direction.as_str(), "Card committed by drag");
                self.settle().await
            }
        }
    }

    /// Accept or reject the active card without a drag.
    pub async fn swipe(&self, direction: Direction) -> SwipeOutcome {
        {
            let mut state = self.lock();
            if state.deck.current().is_none() {
                self.restock_if_empty(&mut state);
                return SwipeOutcome::Ignored;
            }
            if !state.gesture.commit(direction) {
                return SwipeOutcome::Ignored;
            }
        }
        debug!(direction = direction.as_str(), "Card committed by control");
        self.settle().await
    }

    /// Wait out the exit animation, then finalize the decision.
    async fn settle(&self) -> SwipeOutcome {
        tokio::time::sleep(self.config.settle_delay).await;

        let (decision, matched) = {
            let mut guard = self.lock();
            let state = &mut *guard;
            let Some(direction) = state.gesture.finish_settle() else {
                return SwipeOutcome::Ignored;
            };
            let Some(profile) = state.deck.decide() else {
                return SwipeOutcome::Ignored;
            };

            let decision = SwipeDecision { profile, direction };
            let matched = state.engine.evaluate(&decision, &mut state.store);
            state
                .undo
                .record(decision.profile.clone(), matched.as_ref().map(|m| m.id));

            self.restock_if_empty(state);
            (decision, matched)
        };

        info!(
            profile = %decision.profile.id,
            direction = decision.direction.as_str(),
            matched = matched.is_some(),
            "Decision finalized"
        );

        if let Some(ref m) = matched {
            self.persistence.match_created(m);
            emit_event(
                &self.events,
                SessionEvent::ItsAMatch {
                    match_id: m.id,
                    profile_id: m.profile.id.clone(),
                    name: m.profile.name.clone(),
                },
            );
        }

        SwipeOutcome::Decided { decision, matched }
    }

    /// Reverse the last decision: card back in front, and its match and
    /// conversation removed if it created one.
    ///
    /// No-op without a recorded decision or while a card is settling.
    pub fn undo(&self) -> Option<PendingUndo> {
        let (pending, removed) = {
            let mut state = self.lock();
            if state.gesture.is_settling() {
                debug!("Undo rejected while settling");
                return None;
            }
            let pending = state.undo.take()?;

            state.gesture.cancel_drag();
            state.deck.reinsert_front(pending.profile.clone());

            let removed = pending
                .match_id
                .and_then(|id| state.store.remove_match(id))
                .map(|(m, messages)| (m.id, messages));

            if let Some((id, _)) = removed {
                if state.view.active_match == Some(id) {
                    state.view.active_match = None;
                    state.view.screen = divine_shared::Screen::Matches;
                }
            }
            (pending, removed)
        };

        info!(
            profile = %pending.profile.id,
            removed_match = removed.is_some(),
            "Decision undone"
        );

        if let Some((match_id, messages)) = removed {
            debug!(match_id = %match_id, messages, "Match and conversation removed");
            self.persistence.match_removed(match_id);
            emit_event(&self.events, SessionEvent::MatchRemoved { match_id });
        }
        emit_event(
            &self.events,
            SessionEvent::DecisionUndone {
                profile_id: pending.profile.id.clone(),
                removed_match: removed.map(|(id, _)| id),
            },
        );

        Some(pending)
    }
}
