//! Providers module - LLM providers
//!
//! This module defines the `LLMProvider` trait and common types for
//! interacting with LLM providers. Groq (OpenAI-compatible) is the only
//! built-in provider; new providers implement the `LLMProvider` trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use echoclaw::providers::{ChatOptions, LLMProvider};
//! use echoclaw::providers::groq::GroqProvider;
//! use echoclaw::session::Message;
//!
//! async fn example() {
//!     let provider = GroqProvider::new("gsk-xxx");
//!     let messages = vec![Message::user("Hello!")];
//!     let options = ChatOptions::new().with_max_tokens(1000);
//!
//!     let response = provider.chat(messages, None, options).await.unwrap();
//!     println!("Response: {}", response.content);
//! }
//! ```

pub mod groq;
mod types;

use crate::error::ProviderError;

pub use groq::GroqProvider;
pub use types::{ChatOptions, LLMProvider, LLMResponse, Usage};

/// Parse an HTTP status code and response body into a structured [`ProviderError`].
///
/// This centralizes the mapping from HTTP status codes to error
/// classifications so the retry loop can tell transient failures apart
/// from permanent ones.
pub fn parse_provider_error(status: u16, body: &str) -> ProviderError {
    match status {
        401 => ProviderError::Auth(body.to_string()),
        402 => ProviderError::Billing(body.to_string()),
        404 => ProviderError::ModelNotFound(body.to_string()),
        429 => ProviderError::RateLimit(body.to_string()),
        400 => ProviderError::InvalidRequest(body.to_string()),
        408 => ProviderError::Timeout(body.to_string()),
        500..=599 => ProviderError::ServerError(body.to_string()),
        _ => ProviderError::Unknown(format!("HTTP {}: {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_error_401() {
        let err = parse_provider_error(401, "invalid api key");
        assert!(matches!(err, ProviderError::Auth(_)));
        assert_eq!(err.status_code(), Some(401));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_parse_provider_error_402() {
        let err = parse_provider_error(402, "payment required");
        assert!(matches!(err, ProviderError::Billing(_)));
        assert_eq!(err.status_code(), Some(402));
    }

    #[test]
    fn test_parse_provider_error_404() {
        let err = parse_provider_error(404, "model not found");
        assert!(matches!(err, ProviderError::ModelNotFound(_)));
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_parse_provider_error_408() {
        let err = parse_provider_error(408, "request timeout");
        assert!(matches!(err, ProviderError::Timeout(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_provider_error_429() {
        let err = parse_provider_error(429, "rate limited");
        assert!(matches!(err, ProviderError::RateLimit(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_provider_error_400() {
        let err = parse_provider_error(400, "bad json");
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_parse_provider_error_500() {
        let err = parse_provider_error(500, "internal server error");
        assert!(matches!(err, ProviderError::ServerError(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_provider_error_503() {
        let err = parse_provider_error(503, "service unavailable");
        assert!(matches!(err, ProviderError::ServerError(_)));
    }

    #[test]
    fn test_parse_provider_error_unknown() {
        let err = parse_provider_error(418, "i'm a teapot");
        assert!(matches!(err, ProviderError::Unknown(_)));
        assert!(err.to_string().contains("HTTP 418"));
    }
}
