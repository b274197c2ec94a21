//! Turning model-generated profile stubs into full deck profiles.
//!
//! The model only writes the descriptive fields. Identity, verification,
//! photos and distance are filled in locally.

use rand::Rng;
use serde::Deserialize;
use uuid::Uuid;

use divine_shared::profile::sort_for_deck;
use divine_shared::{Photo, Profile, ProfileId};

/// Odds that a generated profile is marked verified.
const VERIFIED_CHANCE: f64 = 0.3;

/// Descriptive fields as returned by the model.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GeneratedProfile {
    pub name: String,
    pub age: u8,
    pub bio: String,
    pub location: String,
    pub job: String,
    pub interests: Vec<String>,
}

fn photo_url(seed: u32) -> String {
    format!("https://picsum.photos/seed/{seed}/600/800")
}

/// Complete one generated stub with locally drawn attributes.
pub fn enrich<R: Rng>(generated: GeneratedProfile, rng: &mut R) -> Profile {
    let seed: u32 = rng.gen_range(0..10_000);
    let photo_count: u32 = rng.gen_range(1..=3);

    let photos = (0..photo_count)
        .map(|i| {
            let photo_seed = seed + i;
            let suffix: String = Uuid::new_v4().simple().to_string().chars().take(5).collect();
            Photo::new(format!("gen-{photo_seed}-{suffix}"), photo_url(photo_seed))
        })
        .collect();

    Profile {
        id: ProfileId::generate(),
        name: generated.name,
        age: generated.age,
        bio: generated.bio,
        location: generated.location,
        job: generated.job,
        interests: generated.interests,
        photos,
        distance: rng.gen_range(1..=30),
        is_verified: rng.gen_bool(VERIFIED_CHANCE),
    }
}

/// Enrich a whole batch and put it in deck order.
pub fn enrich_batch<R: Rng>(batch: Vec<GeneratedProfile>, rng: &mut R) -> Vec<Profile> {
    let mut profiles: Vec<Profile> = batch.into_iter().map(|g| enrich(g, rng)).collect();
    sort_for_deck(&mut profiles);
    profiles
}
