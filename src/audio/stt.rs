//! Speech-to-text via the Groq transcription API
//!
//! Sends a captured WAV recording to the `/audio/transcriptions` endpoint as
//! a multipart upload and returns the transcript text. The endpoint answers
//! with either a JSON object carrying a `text` field or a bare text body
//! depending on the requested response format, so the parser accepts both.

use reqwest::multipart::{Form, Part};

use crate::config::TranscriptionConfig;
use crate::error::{AudioError, Result};
use crate::log_component;

/// Default request timeout for a transcription call.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the Groq `/audio/transcriptions` endpoint.
pub struct GroqTranscriber {
    api_key: String,
    api_base: String,
    model: String,
    language: Option<String>,
    client: reqwest::Client,
}

impl GroqTranscriber {
    /// Create a transcriber.
    ///
    /// # Arguments
    /// * `api_key` - Groq API key
    /// * `api_base` - Provider API base URL, used when the transcription
    ///   config carries no override
    /// * `config` - Transcription settings (model, base override, language)
    pub fn new(api_key: &str, api_base: &str, config: &TranscriptionConfig) -> Self {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| api_base.to_string());
        Self {
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            language: config.language.clone(),
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Transcribe one WAV recording to text.
    ///
    /// # Errors
    /// `AudioError::ServiceUnavailable` when the endpoint cannot be reached
    /// or answers with a non-success status; `AudioError::Unintelligible`
    /// when the service answered but the transcript is empty.
    pub async fn transcribe(&self, audio: Vec<u8>) -> Result<String> {
        let file = Part::bytes(audio)
            .file_name("utterance.wav")
            .mime_str("audio/wav")
            .map_err(|e| AudioError::ServiceUnavailable(e.to_string()))?;

        let mut form = Form::new()
            .part("file", file)
            .text("model", self.model.clone());
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        let url = format!("{}/audio/transcriptions", self.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AudioError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AudioError::ServiceUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(AudioError::ServiceUnavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            ))
            .into());
        }

        let text = extract_text(&body);
        if text.is_empty() {
            return Err(AudioError::Unintelligible.into());
        }

        log_component!(
            debug,
            "audio",
            "utterance transcribed",
            chars = text.len() as u64
        );
        Ok(text)
    }
}

/// Pull the transcript out of a response body.
///
/// The endpoint returns `{"text": "..."}` for the JSON response format and a
/// bare string for the text format; either way the transcript is trimmed.
fn extract_text(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(text) = value.get("text").and_then(|t| t.as_str()) {
            return text.trim().to_string();
        }
    }
    body.trim().to_string()
}
