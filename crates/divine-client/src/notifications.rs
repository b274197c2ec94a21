//! Notification dispatcher: decides whether an incoming message raises a
//! user-visible alert, and presents it through an [`AlertSink`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use divine_shared::constants::DEFAULT_MATCH_NAME;
use divine_shared::{MatchId, NotifyError, SenderId};

use crate::state::ViewState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
}

impl Alert {
    /// Alert for a message from `name` (or the default match name).
    pub fn for_message(name: Option<&str>, text: &str, icon: Option<&str>) -> Self {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_MATCH_NAME);
        Self {
            title: format!("Message from {name}"),
            body: text.to_string(),
            icon: icon.map(str::to_string),
        }
    }
}

/// Presents alerts to the user. May fail.
pub trait AlertSink: Send + Sync {
    fn present(&self, alert: &Alert) -> Result<(), NotifyError>;
}

/// Sink that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlerts;

impl AlertSink for LogAlerts {
    fn present(&self, alert: &Alert) -> Result<(), NotifyError> {
        tracing::info!(title = %alert.title, body = %alert.body, "Alert");
        Ok(())
    }
}

/// Whether a stored message from `sender` on `match_id` should alert.
pub fn should_notify(sender: &SenderId, match_id: MatchId, view: &ViewState) -> bool {
    !sender.is_session_user() && view.notifications_permitted && !view.is_foreground(match_id)
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    sink: Arc<dyn AlertSink>,
}

impl NotificationDispatcher {
    pub fn new(sink: Arc<dyn AlertSink>) -> Self {
        Self { sink }
    }

    /// Present `alert`. Failures are logged and swallowed.
    pub fn dispatch(&self, match_id: MatchId, alert: &Alert) {
        match self.sink.present(alert) {
            Ok(()) => debug!(match_id = %match_id, "Alert presented"),
            Err(e) => warn!(match_id = %match_id, error = %e, "Failed to present alert"),
        }
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher").finish_non_exhaustive()
    }
}
