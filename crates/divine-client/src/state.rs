//! Session state shared by every operation.
//!
//! The [`SessionState`] is wrapped in `Arc<Mutex<>>` inside
//! [`Session`](crate::session::Session). Every transition is one short
//! critical section; no lock is held across an await.

use divine_shared::{MatchId, Screen};
use divine_store::ConversationStore;

use crate::config::SessionConfig;
use crate::deck::Deck;
use crate::gesture::Gesture;
use crate::matching::{DrawSource, MatchEngine};
use crate::undo::UndoSlot;

/// Visibility and navigation state read by unread accounting and the
/// notification dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Whether the app window is visible to the user.
    pub app_visible: bool,
    pub screen: Screen,
    /// Match whose conversation is open, when `screen` is `Chat`.
    pub active_match: Option<MatchId>,
    /// Notification permission as granted by the user.
    pub notifications_permitted: bool,
}

impl ViewState {
    pub fn new(notifications_permitted: bool) -> Self {
        Self {
            app_visible: true,
            screen: Screen::Swipe,
            active_match: None,
            notifications_permitted,
        }
    }

    /// True when `match_id`'s conversation is on screen right now.
    pub fn is_foreground(&self, match_id: MatchId) -> bool {
        self.app_visible && self.screen == Screen::Chat && self.active_match == Some(match_id)
    }
}

/// Central session state.
#[derive(Debug)]
pub struct SessionState {
    pub deck: Deck,
    pub gesture: Gesture,
    pub engine: MatchEngine,
    pub undo: UndoSlot,
    pub store: ConversationStore,
    pub view: ViewState,
}

impl SessionState {
    pub fn new(config: &SessionConfig, draw: Box<dyn DrawSource>) -> Self {
        Self {
            deck: Deck::new(),
            gesture: Gesture::new(config.gesture),
            engine: MatchEngine::new(config.policy, draw),
            undo: UndoSlot::new(),
            store: ConversationStore::new(),
            view: ViewState::new(config.notifications_enabled),
        }
    }
}
