//! Candidate profile records and the deck ordering policy.
//!
//! A [`Profile`] is immutable once it is placed in the deck. Edits replace
//! the whole record; nothing in the engine mutates a profile in place.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::ProfileId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub url: String,
    pub caption: Option<String>,
}

impl Photo {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            caption: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub age: u8,
    pub bio: String,
    pub location: String,
    /// Occupation.
    pub job: String,
    pub interests: Vec<String>,
    /// Ordered; the first photo is the card's cover.
    pub photos: Vec<Photo>,
    /// Distance from the session user in miles.
    pub distance: u32,
    pub is_verified: bool,
}

impl Profile {
    pub fn primary_photo_url(&self) -> Option<&str> {
        self.photos.first().map(|p| p.url.as_str())
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }
}

/// Supply ordering: verified first, then more photos first.
///
/// Returns `Ordering::Equal` for ties so a stable sort keeps arrival order.
pub fn deck_order(a: &Profile, b: &Profile) -> Ordering {
    b.is_verified
        .cmp(&a.is_verified)
        .then_with(|| b.photo_count().cmp(&a.photo_count()))
}

/// Sort a batch in place by [`deck_order`]. Stable.
pub fn sort_for_deck(profiles: &mut [Profile]) {
    profiles.sort_by(deck_order);
}
