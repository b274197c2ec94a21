//! # divine-client
//!
//! Session engine for Divine: the swipe deck, gesture interpreter, match
//! decision, single-level undo, conversations with responder replies, and
//! the notification dispatcher, all behind one [`Session`] handle.

pub mod commands;
pub mod config;
pub mod deck;
pub mod events;
pub mod gesture;
pub mod matching;
pub mod notifications;
pub mod persistence;
pub mod session;
pub mod state;
pub mod undo;

use tracing_subscriber::{fmt, EnvFilter};

pub use commands::deck::SwipeOutcome;
pub use commands::messaging::{MatchSummaryDto, PendingReply};
pub use config::{GestureConfig, MatchPolicy, SessionConfig};
pub use events::SessionEvent;
pub use session::{Session, SessionBuilder};

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("divine=debug,divine_client=debug,divine_content=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
