//! Configuration type definitions for EchoClaw
//!
//! This module defines all configuration structs used throughout the agent.
//! All types implement serde traits for JSON serialization and have sensible defaults.

use serde::{Deserialize, Serialize};

/// Main configuration struct for EchoClaw
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Agent loop settings (models, protocol limits, context budget)
    pub agent: AgentConfig,
    /// LLM provider configuration
    pub providers: ProvidersConfig,
    /// Audio pipeline configuration (capture, transcription, speech)
    pub audio: AudioConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

// ============================================================================
// Agent Configuration
// ============================================================================

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Main conversation model
    pub model: String,
    /// Cheaper model used for context summarization
    pub summary_model: String,
    /// Sampling temperature for both models
    pub temperature: f32,
    /// Maximum tokens per step response
    pub max_tokens: u32,
    /// Maximum tokens for a context summary
    pub summary_max_tokens: u32,
    /// Total history content length (chars) that triggers compression.
    /// A character-count proxy for token usage.
    pub context_threshold: usize,
    /// Messages kept verbatim at the tail during compression
    pub keep_recent: usize,
    /// Model call attempts before a turn is abandoned
    pub max_attempts: u32,
    /// Default timeout (seconds) for the run_command tool
    pub command_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "meta-llama/llama-4-scout-17b-16e-instruct".to_string(),
            summary_model: "llama3-8b-8192".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            summary_max_tokens: 500,
            context_threshold: 15_000,
            keep_recent: 10,
            max_attempts: 3,
            command_timeout_secs: 60,
        }
    }
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// LLM provider configurations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Groq (OpenAI-compatible) provider
    pub groq: Option<ProviderConfig>,
}

/// Configuration for a single provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key for authentication
    pub api_key: Option<String>,
    /// Override for the API base URL
    pub api_base: Option<String>,
}

// ============================================================================
// Audio Configuration
// ============================================================================

/// Audio pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AudioConfig {
    /// Microphone capture settings
    pub capture: CaptureConfig,
    /// Speech-to-text settings
    pub transcription: TranscriptionConfig,
    /// Text-to-speech settings
    pub speech: SpeechConfig,
}

/// Microphone capture settings.
///
/// The capture command is a template; `{output}` is replaced with the
/// recording path and `{seconds}` with the maximum utterance length.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Recorder command template
    pub command: String,
    /// Maximum utterance length in seconds
    pub max_seconds: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            command: "arecord -q -f S16_LE -c 1 -r 16000 -d {seconds} {output}".to_string(),
            max_seconds: 10,
        }
    }
}

/// Speech-to-text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Transcription model
    pub model: String,
    /// Override for the transcription API base URL (defaults to the provider base)
    pub api_base: Option<String>,
    /// Optional language hint (ISO 639-1)
    pub language: Option<String>,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: "whisper-large-v3".to_string(),
            api_base: None,
            language: None,
        }
    }
}

/// Text-to-speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whether synthesized speech playback is enabled.
    /// When disabled the agent prints spoken lines to the console instead.
    pub enabled: bool,
    /// Synthesis model
    pub model: String,
    /// Synthesis voice
    pub voice: String,
    /// Playback command template; `{file}` is replaced with the WAV path
    pub playback_command: String,
    /// Override for the synthesis API base URL (defaults to the provider base)
    pub api_base: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "playai-tts".to_string(),
            voice: "Fritz-PlayAI".to_string(),
            playback_command: "aplay -q {file}".to_string(),
            api_base: None,
        }
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Optional log file path (JSON format only); stderr when unset
    pub file: Option<String>,
    /// Default level filter when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Component,
            file: None,
            level: "info".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable pretty printing
    Pretty,
    /// Compact text with a structured `component` field
    #[default]
    Component,
    /// JSON lines for log aggregators
    Json,
}
