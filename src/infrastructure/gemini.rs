// src/infrastructure/gemini.rs
use crate::application::CardSource;
use crate::constants::{GEMINI_API_BASE, REQUEST_TIMEOUT_SECS};
use crate::domain::{GenerationError, Language, CARD_FIELDS};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument};

/// Card source backed by the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl GeminiClient {
    /// Fails with [`GenerationError::MissingApiKey`] if `api_key` is absent or blank.
    pub fn new(api_key: Option<&str>, model: impl Into<String>) -> Result<Self, GenerationError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: model.into(),
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Point the client at another API root, e.g. a local proxy
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// JSON request asking for a single card object matching the card schema
fn request_body(prompt: &str) -> Value {
    let text_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    let required = CARD_FIELDS;
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "word": { "type": "STRING" },
                    "category": { "type": "STRING" },
                    "definition": text_list,
                    "forms": text_list,
                    "example": text_list,
                    "reverse": text_list,
                },
                "required": required,
            },
        },
    })
}

fn response_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}

/// Error for a non-success status, with the message of the JSON error envelope
/// or else the raw body
fn api_error(status: u16, body: String) -> GenerationError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    GenerationError::Api { status, message }
}

impl CardSource for GeminiClient {
    #[instrument(level = "debug", skip(self), fields(model = %self.model))]
    fn fetch(&self, word: &str, lang: Language) -> Result<String, GenerationError> {
        let body = request_body(&lang.prompt_for(word));

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }

        let text = response_text(response.json()?)?;
        debug!(len = text.len(), "Received model response");
        Ok(text)
    }
}
