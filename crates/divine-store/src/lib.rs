//! # divine-store
//!
//! In-memory conversation storage for the Divine session.
//!
//! The crate exposes a synchronous [`ConversationStore`] holding the match
//! collection, one append-only conversation per match, unread counters and
//! composing indicators. Durable storage is a separate collaborator; this
//! store lives exactly as long as the session.

pub mod matches;
pub mod messages;
pub mod models;
pub mod store;

mod error;

pub use error::{Result, StoreError};
pub use models::*;
pub use store::ConversationStore;
