//! Error types for EchoClaw
//!
//! This module defines all error types used throughout the EchoClaw agent.
//! Uses `thiserror` for ergonomic error handling with automatic `Display` and
//! `Error` trait implementations.

use std::fmt;
use thiserror::Error;

// ============================================================================
// Provider Error Classification
// ============================================================================

/// Structured provider error classification.
///
/// Provides fine-grained categorization of LLM provider HTTP errors,
/// enabling intelligent retry decisions without string matching.
#[derive(Debug)]
pub enum ProviderError {
    /// 401 — Invalid API key or authentication failure
    Auth(String),
    /// 429 — Rate limit or quota exceeded
    RateLimit(String),
    /// 402 — Payment required or billing issue
    Billing(String),
    /// 500/502/503/504 — Server-side errors
    ServerError(String),
    /// 400 — Bad request, invalid JSON, malformed parameters
    InvalidRequest(String),
    /// 404 — Model not found or endpoint not available
    ModelNotFound(String),
    /// Connection or read timeout
    Timeout(String),
    /// Catch-all for unrecognized errors
    Unknown(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Auth(msg) => write!(f, "Authentication error: {}", msg),
            ProviderError::RateLimit(msg) => write!(f, "Rate limit error: {}", msg),
            ProviderError::Billing(msg) => write!(f, "Billing error: {}", msg),
            ProviderError::ServerError(msg) => write!(f, "Server error: {}", msg),
            ProviderError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ProviderError::ModelNotFound(msg) => write!(f, "Model not found: {}", msg),
            ProviderError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            ProviderError::Unknown(msg) => write!(f, "Unknown provider error: {}", msg),
        }
    }
}

impl ProviderError {
    /// Returns `true` if this error is transient and the request should be retried.
    ///
    /// Retryable errors: RateLimit, ServerError, Timeout, Unknown (network-level).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimit(_)
                | ProviderError::ServerError(_)
                | ProviderError::Timeout(_)
                | ProviderError::Unknown(_)
        )
    }

    /// Returns the HTTP status code associated with this error, if applicable.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderError::Auth(_) => Some(401),
            ProviderError::RateLimit(_) => Some(429),
            ProviderError::Billing(_) => Some(402),
            ProviderError::ServerError(_) => Some(500),
            ProviderError::InvalidRequest(_) => Some(400),
            ProviderError::ModelNotFound(_) => Some(404),
            ProviderError::Timeout(_) => None,
            ProviderError::Unknown(_) => None,
        }
    }
}

impl From<ProviderError> for EchoError {
    fn from(err: ProviderError) -> Self {
        EchoError::ProviderTyped(err)
    }
}

// ============================================================================
// Audio Error Classification
// ============================================================================

/// Perception-layer error classification.
///
/// Distinguishes "the user mumbled" from "the speech service is down" so the
/// agent loop can pick the right spoken recovery phrase. Both are recovered
/// in the listening state without consuming a conversation turn.
#[derive(Debug)]
pub enum AudioError {
    /// Speech was captured but produced no usable transcript
    Unintelligible,
    /// The transcription service could not be reached or errored
    ServiceUnavailable(String),
    /// Microphone / recorder failure
    Capture(String),
    /// Speech synthesis or playback failure (best-effort, logged only)
    Playback(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unintelligible => write!(f, "speech was unintelligible"),
            AudioError::ServiceUnavailable(msg) => {
                write!(f, "speech service unavailable: {}", msg)
            }
            AudioError::Capture(msg) => write!(f, "audio capture failed: {}", msg),
            AudioError::Playback(msg) => write!(f, "audio playback failed: {}", msg),
        }
    }
}

impl From<AudioError> for EchoError {
    fn from(err: AudioError) -> Self {
        EchoError::Audio(err)
    }
}

// ============================================================================
// Primary Error Type
// ============================================================================

/// The primary error type for EchoClaw operations.
#[derive(Error, Debug)]
pub enum EchoError {
    /// Configuration-related errors (invalid config, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider errors (API failures, model errors, etc.)
    /// Kept for provider-internal messages — new code should prefer `ProviderTyped`.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Structured provider error with classification for retry decisions.
    #[error("Provider error: {0}")]
    ProviderTyped(ProviderError),

    /// Step protocol errors (model reply was not valid structured JSON)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Perception-layer errors (capture, transcription, playback)
    #[error("Audio error: {0}")]
    Audio(AudioError),

    /// Tool execution errors (invalid parameters, execution failures, etc.)
    #[error("Tool error: {0}")]
    Tool(String),

    /// Background process management errors (spawn failures, kill failures)
    #[error("Process error: {0}")]
    Process(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found (tools, providers, etc.)
    #[error("Not found: {0}")]
    NotFound(String),
}

/// A specialized `Result` type for EchoClaw operations.
pub type Result<T> = std::result::Result<T, EchoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EchoError::Config("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let echo_err: EchoError = io_err.into();
        assert!(matches!(echo_err, EchoError::Io(_)));
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }

    #[test]
    fn test_error_variants() {
        // Ensure all variants can be created
        let _ = EchoError::Config("test".into());
        let _ = EchoError::Provider("test".into());
        let _ = EchoError::ProviderTyped(ProviderError::Auth("test".into()));
        let _ = EchoError::Protocol("test".into());
        let _ = EchoError::Audio(AudioError::Unintelligible);
        let _ = EchoError::Tool("test".into());
        let _ = EchoError::Process("test".into());
        let _ = EchoError::NotFound("test".into());
    }

    // ====================================================================
    // ProviderError tests
    // ====================================================================

    #[test]
    fn test_provider_error_display() {
        assert!(ProviderError::Auth("bad key".into())
            .to_string()
            .contains("Authentication error"));
        assert!(ProviderError::RateLimit("quota".into())
            .to_string()
            .contains("Rate limit error"));
        assert!(ProviderError::Billing("no funds".into())
            .to_string()
            .contains("Billing error"));
        assert!(ProviderError::ServerError("500".into())
            .to_string()
            .contains("Server error"));
        assert!(ProviderError::InvalidRequest("bad json".into())
            .to_string()
            .contains("Invalid request"));
        assert!(ProviderError::ModelNotFound("llama-99".into())
            .to_string()
            .contains("Model not found"));
        assert!(ProviderError::Timeout("30s".into())
            .to_string()
            .contains("Timeout"));
        assert!(ProviderError::Unknown("???".into())
            .to_string()
            .contains("Unknown provider error"));
    }

    #[test]
    fn test_provider_error_is_retryable() {
        // Retryable
        assert!(ProviderError::RateLimit("429".into()).is_retryable());
        assert!(ProviderError::ServerError("500".into()).is_retryable());
        assert!(ProviderError::Timeout("timeout".into()).is_retryable());
        assert!(ProviderError::Unknown("connection reset".into()).is_retryable());

        // Not retryable
        assert!(!ProviderError::Auth("401".into()).is_retryable());
        assert!(!ProviderError::Billing("402".into()).is_retryable());
        assert!(!ProviderError::InvalidRequest("400".into()).is_retryable());
        assert!(!ProviderError::ModelNotFound("404".into()).is_retryable());
    }

    #[test]
    fn test_provider_error_status_code() {
        assert_eq!(ProviderError::Auth("x".into()).status_code(), Some(401));
        assert_eq!(
            ProviderError::RateLimit("x".into()).status_code(),
            Some(429)
        );
        assert_eq!(ProviderError::Billing("x".into()).status_code(), Some(402));
        assert_eq!(
            ProviderError::ServerError("x".into()).status_code(),
            Some(500)
        );
        assert_eq!(
            ProviderError::InvalidRequest("x".into()).status_code(),
            Some(400)
        );
        assert_eq!(
            ProviderError::ModelNotFound("x".into()).status_code(),
            Some(404)
        );
        assert_eq!(ProviderError::Timeout("x".into()).status_code(), None);
        assert_eq!(ProviderError::Unknown("x".into()).status_code(), None);
    }

    #[test]
    fn test_provider_error_into_echo_error() {
        let pe = ProviderError::RateLimit("too fast".into());
        let ee: EchoError = pe.into();
        assert!(matches!(ee, EchoError::ProviderTyped(_)));
        assert!(ee.to_string().contains("Rate limit error"));
    }

    // ====================================================================
    // AudioError tests
    // ====================================================================

    #[test]
    fn test_audio_error_display() {
        assert!(AudioError::Unintelligible
            .to_string()
            .contains("unintelligible"));
        assert!(AudioError::ServiceUnavailable("dns".into())
            .to_string()
            .contains("speech service unavailable"));
        assert!(AudioError::Capture("no mic".into())
            .to_string()
            .contains("capture failed"));
        assert!(AudioError::Playback("no sink".into())
            .to_string()
            .contains("playback failed"));
    }

    #[test]
    fn test_audio_error_into_echo_error() {
        let ae = AudioError::Unintelligible;
        let ee: EchoError = ae.into();
        assert!(matches!(ee, EchoError::Audio(AudioError::Unintelligible)));
    }
}
