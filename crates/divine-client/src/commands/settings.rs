//! Visibility, navigation and notification permission.

use serde::Serialize;
use tracing::info;

use divine_shared::Screen;

use crate::session::Session;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSettings {
    pub app_visible: bool,
    pub screen: Screen,
    pub notifications_permitted: bool,
    pub model: String,
    pub online: bool,
}

impl Session {
    pub fn view_settings(&self) -> ViewSettings {
        let state = self.lock();
        ViewSettings {
            app_visible: state.view.app_visible,
            screen: state.view.screen,
            notifications_permitted: state.view.notifications_permitted,
            model: self.config.model.clone(),
            online: self.config.api_key.is_some(),
        }
    }

    /// App window shown or hidden (backgrounded).
    pub fn set_app_visible(&self, visible: bool) {
        self.lock().view.app_visible = visible;
        info!(visible, "App visibility changed");
    }

    /// Navigate to a top-level screen. Leaving `Chat` closes the open
    /// conversation; use [`Session::open_conversation`] to enter it.
    pub fn set_screen(&self, screen: Screen) {
        let mut state = self.lock();
        if screen != Screen::Chat {
            state.view.active_match = None;
        }
        state.view.screen = screen;
    }

    pub fn set_notifications_permitted(&self, permitted: bool) {
        self.lock().view.notifications_permitted = permitted;
        info!(permitted, "Notification permission changed");
    }
}
