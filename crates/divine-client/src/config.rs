//! Session configuration loaded from environment variables.
//!
//! Every setting has a default so the client starts with zero configuration.
//! Without `GEMINI_API_KEY` the session runs offline on its built-in
//! fallbacks.

use std::time::Duration;

use divine_content::{GeminiConfig, DEFAULT_GEMINI_MODEL, GEMINI_API_BASE_URL};
use divine_shared::constants::{
    DECK_BATCH_SIZE, MATCH_THRESHOLD, OFFSCREEN_OFFSET, ROTATION_DEG_PER_UNIT, SETTLE_DELAY_MS,
    STAMP_DISTANCE, SWIPE_COMMIT_DISTANCE,
};

/// Match and deck policy values. Set in code, never exposed as user settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    /// An accept matches iff the draw is strictly greater than this.
    pub match_threshold: f64,
    /// Profiles requested per replenishment.
    pub deck_batch_size: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            match_threshold: MATCH_THRESHOLD,
            deck_batch_size: DECK_BATCH_SIZE,
        }
    }
}

/// Card geometry used by the gesture interpreter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub commit_distance: f32,
    pub stamp_distance: f32,
    pub rotation_per_unit: f32,
    pub offscreen_offset: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            commit_distance: SWIPE_COMMIT_DISTANCE,
            stamp_distance: STAMP_DISTANCE,
            rotation_per_unit: ROTATION_DEG_PER_UNIT,
            offscreen_offset: OFFSCREEN_OFFSET,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Env: `GEMINI_API_KEY`. Default: none (offline).
    pub api_key: Option<String>,

    /// Env: `GEMINI_MODEL`. Default: `gemini-2.5-flash`.
    pub model: String,

    /// Env: `GEMINI_API_BASE`.
    pub api_base: String,

    /// Length of the card exit animation.
    /// Env: `DIVINE_SETTLE_DELAY_MS`. Default: 300 ms.
    pub settle_delay: Duration,

    /// Initial notification permission.
    /// Env: `DIVINE_NOTIFICATIONS` (true/false). Default: `true`.
    pub notifications_enabled: bool,

    pub policy: MatchPolicy,

    pub gesture: GestureConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: GEMINI_API_BASE_URL.to_string(),
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
            notifications_enabled: true,
            policy: MatchPolicy::default(),
            gesture: GestureConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(key) = var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                config.api_key = Some(key);
            }
        }

        if let Some(model) = var("GEMINI_MODEL") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }

        if let Some(base) = var("GEMINI_API_BASE") {
            config.api_base = base;
        }

        if let Some(val) = var("DIVINE_SETTLE_DELAY_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.settle_delay = Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid DIVINE_SETTLE_DELAY_MS, using default");
                }
            }
        }

        if let Some(val) = var("DIVINE_NOTIFICATIONS") {
            config.notifications_enabled = val != "false" && val != "0";
        }

        config
    }

    /// Gemini connection settings, if an API key is configured.
    pub fn gemini(&self) -> Option<GeminiConfig> {
        let key = self.api_key.as_ref()?;
        let mut gemini = GeminiConfig::new(key.clone());
        gemini.model = self.model.clone();
        gemini.base_url = self.api_base.clone();
        Some(gemini)
    }
}
