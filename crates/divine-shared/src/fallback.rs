//! Built-in profiles used when the profile supply is unavailable.

use crate::profile::{sort_for_deck, Photo, Profile};
use crate::types::ProfileId;

fn picsum(seed: u32) -> String {
    format!("https://picsum.photos/seed/{seed}/600/800")
}

/// The fixed fallback set, already in deck order.
pub fn fallback_profiles() -> Vec<Profile> {
    let mut profiles = vec![
        Profile {
            id: ProfileId::new("1"),
            name: "Sarah".into(),
            age: 24,
            bio: "Coffee addict and dog lover ☕️🐶".into(),
            location: "New York".into(),
            job: "Designer".into(),
            interests: vec!["Art".into(), "Coffee".into(), "Yoga".into()],
            photos: vec![Photo::new("p1", picsum(101))],
            distance: 3,
            is_verified: true,
        },
        Profile {
            id: ProfileId::new("2"),
            name: "Mike".into(),
            age: 28,
            bio: "Adventure seeker. Let's hike!".into(),
            location: "Brooklyn".into(),
            job: "Engineer".into(),
            interests: vec!["Hiking".into(), "Tech".into(), "Pizza".into()],
            photos: vec![Photo::new("p2", picsum(102)), Photo::new("p2-2", picsum(103))],
            distance: 5,
            is_verified: false,
        },
        Profile {
            id: ProfileId::new("3"),
            name: "Alex".into(),
            age: 26,
            bio: "Musician and dreamer. Always looking for new inspiration.".into(),
            location: "Austin".into(),
            job: "Musician".into(),
            interests: vec!["Music".into(), "Travel".into(), "Photography".into()],
            photos: vec![Photo::new("p3", picsum(104))],
            distance: 12,
            is_verified: true,
        },
    ];
    sort_for_deck(&mut profiles);
    profiles
}
