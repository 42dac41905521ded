//! Text-to-speech via the Groq speech API
//!
//! [`GroqSpeaker`] synthesizes a WAV clip through the `/audio/speech`
//! endpoint and plays it with a configurable playback command. Speaking is
//! best-effort: any synthesis or playback failure is logged and swallowed so
//! a broken audio sink never takes down a turn. [`ConsoleSpeaker`] is the
//! print-only fallback for the `--text` mode and for machines without audio.

use std::io::Write as _;

use async_trait::async_trait;
use serde_json::json;

use crate::config::SpeechConfig;
use crate::error::{AudioError, Result};
use crate::log_component;

use super::types::Speaker;

/// Default request timeout for a synthesis call.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Speaker backed by Groq speech synthesis and a local playback command.
///
/// The playback command is a template; `{file}` is replaced with the path of
/// the synthesized WAV clip. The default template shells out to `aplay`.
pub struct GroqSpeaker {
    api_key: String,
    api_base: String,
    model: String,
    voice: String,
    playback_command: String,
    enabled: bool,
    client: reqwest::Client,
}

impl GroqSpeaker {
    /// Create a speaker.
    ///
    /// # Arguments
    /// * `api_key` - Groq API key
    /// * `api_base` - Provider API base URL, used when the speech config
    ///   carries no override
    /// * `config` - Speech settings (model, voice, playback command)
    pub fn new(api_key: &str, api_base: &str, config: &SpeechConfig) -> Self {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| api_base.to_string());
        Self {
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            voice: config.voice.clone(),
            playback_command: config.playback_command.clone(),
            enabled: config.enabled,
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Synthesize one line of speech and return the WAV bytes.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let url = format!("{}/audio/speech", self.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "voice": self.voice,
                "input": text,
                "response_format": "wav",
            }))
            .send()
            .await
            .map_err(|e| AudioError::Playback(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AudioError::Playback(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            ))
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Write the clip to a scratch file and run the playback command on it.
    async fn play(&self, wav: &[u8]) -> Result<()> {
        let mut file = tempfile::Builder::new()
            .suffix(".wav")
            .tempfile()
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        file.write_all(wav)
            .map_err(|e| AudioError::Playback(e.to_string()))?;

        let command = self
            .playback_command
            .replace("{file}", &file.path().to_string_lossy());
        let status = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&command)
            .status()
            .await
            .map_err(|e| AudioError::Playback(format!("player failed to start: {}", e)))?;

        if !status.success() {
            return Err(AudioError::Playback(format!("player exited with {}", status)).into());
        }
        Ok(())
    }

    /// Synthesize and play one line.
    async fn voice(&self, text: &str) -> Result<()> {
        let wav = self.synthesize(text).await?;
        self.play(&wav).await
    }
}

#[async_trait]
impl Speaker for GroqSpeaker {
    async fn say(&self, text: &str) {
        println!("Speaking: {}", text);
        if !self.enabled {
            return;
        }
        if let Err(e) = self.voice(text).await {
            log_component!(
                warn,
                "audio",
                "speech playback failed, continuing silently",
                error = e.to_string()
            );
        }
    }
}

/// Print-only speaker for console mode.
pub struct ConsoleSpeaker;

#[async_trait]
impl Speaker for ConsoleSpeaker {
    async fn say(&self, text: &str) {
        println!("Speaking: {}", text);
    }
}
