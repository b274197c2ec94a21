//! Prompt text and response schemas sent to the content model.

use serde_json::{json, Value};

use divine_shared::Profile;

/// Instruction asking the model for `count` candidate profiles.
pub fn profile_generation_prompt(count: usize) -> String {
    format!(
        "Generate {count} diverse dating profiles for adults (20-40 years old). \
         Ensure a rich mix of cultural backgrounds, professions (tech, arts, trades, science), and personality types. \
         Include varied interests ranging from outdoor activities to niche hobbies (e.g., pottery, coding, bird watching). \
         Return a JSON array where each object has: name, age, bio (witty, unique, under 150 chars), \
         location (city name), job, interests (array of 3 distinct strings)."
    )
}

/// JSON schema constraining the profile generation response.
pub fn profile_response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "age": { "type": "INTEGER" },
                "bio": { "type": "STRING" },
                "location": { "type": "STRING" },
                "job": { "type": "STRING" },
                "interests": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["name", "age", "bio", "location", "job", "interests"]
        }
    })
}

/// Persona instruction for replying as `counterpart`.
pub fn persona_instruction(counterpart: &Profile) -> String {
    format!(
        "You are playing the role of a user on a dating app.\n\
         Your name is {name}, you are {age} years old.\n\
         Your bio is: \"{bio}\".\n\
         Your interests are: {interests}.\n\
         Your job is: {job}.\n\
         \n\
         Rules:\n\
         1. Keep responses short and casual (texting style).\n\
         2. Use emojis occasionally.\n\
         3. Be engaging but not desperate.\n\
         4. If the user is creepy, be distant or unmatch.\n\
         5. Do not sign your messages.",
        name = counterpart.name,
        age = counterpart.age,
        bio = counterpart.bio,
        interests = counterpart.interests.join(", "),
        job = counterpart.job,
    )
}
