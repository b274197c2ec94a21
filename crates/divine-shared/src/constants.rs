/// Application name
pub const APP_NAME: &str = "Divine";

/// Sentinel sender id of the session user
pub const SESSION_USER_ID: &str = "user";

/// An accept becomes a match iff a uniform draw in [0, 1) exceeds this (60 % odds)
pub const MATCH_THRESHOLD: f64 = 0.4;

/// Number of profiles requested from the supply per replenishment
pub const DECK_BATCH_SIZE: usize = 5;

/// Horizontal drag distance that must be exceeded to commit a swipe
pub const SWIPE_COMMIT_DISTANCE: f32 = 100.0;

/// Drag distance at which the LIKE / NOPE stamp appears
pub const STAMP_DISTANCE: f32 = 60.0;

/// Card rotation in degrees per unit of horizontal offset
pub const ROTATION_DEG_PER_UNIT: f32 = 0.05;

/// Offset a committed card is driven to before it is popped
pub const OFFSCREEN_OFFSET: f32 = 1000.0;

/// Exit animation length in milliseconds; the decision is finalized after it
pub const SETTLE_DELAY_MS: u64 = 300;

/// Reply stored when the responder fails
pub const RESPONDER_APOLOGY: &str = "Hey! Sorry, my internet is acting up properly right now 😅";

/// Reply stored when the responder returns no text
pub const EMPTY_REPLY_PLACEHOLDER: &str = "...";

/// Notification title name when the counterpart is unknown
pub const DEFAULT_MATCH_NAME: &str = "Divine Match";
