//! # divine-shared
//!
//! Domain types shared by every Divine crate: identifiers, candidate
//! profiles, swipe decisions, the deck ordering policy, policy constants and
//! the built-in fallback profiles.

pub mod constants;
pub mod error;
pub mod fallback;
pub mod profile;
pub mod types;

pub use error::{ContentError, NotifyError};
pub use profile::{Photo, Profile};
pub use types::*;
