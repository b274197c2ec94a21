//! Content collaborator backed by the Gemini `generateContent` API.
//!
//! One non-streaming request per call. Profile generation asks for a JSON
//! array constrained by a response schema; replies use a persona system
//! instruction and the conversation history as `user` / `model` contents.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use divine_shared::{ChatTurn, ContentError, Profile};

use crate::collaborator::{ProfileSupply, Responder};
use crate::enrich::{enrich_batch, GeneratedProfile};
use crate::prompt::{persona_instruction, profile_generation_prompt, profile_response_schema};

/// Canonical Gemini API base URL.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const CONNECT_TIMEOUT_SECS: u64 = 30;

const MAX_ERROR_BODY_CHARS: usize = 2048;

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Overridable so tests can point at a local mock server.
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: GEMINI_API_BASE_URL.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

// Typed view of the parts of the response we read.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Gemini HTTP client implementing both collaborator contracts.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ContentError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ContentError::Http(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// POST a request body and return the first candidate's text.
    ///
    /// An answer with a candidate but no text yields an empty string; an
    /// answer without candidates is [`ContentError::EmptyResponse`].
    async fn generate(&self, body: &Value) -> Result<String, ContentError> {
        if self.config.api_key.trim().is_empty() {
            return Err(ContentError::MissingApiKey);
        }

        let response = self
            .http
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ContentError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut text = response.text().await.unwrap_or_default();
            if text.len() > MAX_ERROR_BODY_CHARS {
                let cut = (0..=MAX_ERROR_BODY_CHARS)
                    .rev()
                    .find(|i| text.is_char_boundary(*i))
                    .unwrap_or(0);
                text.truncate(cut);
                text.push_str("...(truncated)");
            }
            warn!(status = status.as_u16(), model = %self.config.model, "Gemini request failed");
            return Err(ContentError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ContentError::Decode(e.to_string()))?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or(ContentError::EmptyResponse)?;

        Ok(candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default())
    }
}

fn profiles_request(count: usize) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": profile_generation_prompt(count) }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": profile_response_schema()
        }
    })
}

fn reply_request(message: &str, counterpart: &Profile, history: &[ChatTurn]) -> Value {
    let mut contents: Vec<Value> = history
        .iter()
        .map(|turn| {
            json!({
                "role": turn.role.as_str(),
                "parts": [{ "text": turn.text }]
            })
        })
        .collect();
    contents.push(json!({
        "role": "user",
        "parts": [{ "text": message }]
    }));

    json!({
        "system_instruction": {
            "parts": [{ "text": persona_instruction(counterpart) }]
        },
        "contents": contents
    })
}

#[async_trait]
impl ProfileSupply for GeminiClient {
    async fn fetch(&self, count: usize) -> Result<Vec<Profile>, ContentError> {
        let text = self.generate(&profiles_request(count)).await?;
        let generated: Vec<GeneratedProfile> = serde_json::from_str(&text)?;
        let profiles = enrich_batch(generated, &mut rand::thread_rng());
        info!(requested = count, received = profiles.len(), "Generated candidate profiles");
        Ok(profiles)
    }
}

#[async_trait]
impl Responder for GeminiClient {
    async fn reply(
        &self,
        message: &str,
        counterpart: &Profile,
        history: &[ChatTurn],
    ) -> Result<String, ContentError> {
        let text = self
            .generate(&reply_request(message, counterpart, history))
            .await?;
        debug!(counterpart = %counterpart.id, len = text.len(), "Counterpart reply generated");
        Ok(text)
    }
}
