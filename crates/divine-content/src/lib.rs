//! # divine-content
//!
//! External content collaborator for the Divine session: candidate profile
//! generation and in-character counterpart replies.
//!
//! The session depends only on the [`ProfileSupply`] and [`Responder`]
//! traits. [`GeminiClient`] implements both against the Gemini API and
//! [`OfflineContent`] is used when no API key is configured.

pub mod collaborator;
pub mod enrich;
pub mod gemini;
pub mod prompt;

pub use collaborator::{OfflineContent, ProfileSupply, Responder};
pub use enrich::GeneratedProfile;
pub use gemini::{GeminiClient, GeminiConfig, DEFAULT_GEMINI_MODEL, GEMINI_API_BASE_URL};
