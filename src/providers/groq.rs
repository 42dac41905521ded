//! Groq Provider Implementation
//!
//! This module implements the `LLMProvider` trait for Groq's OpenAI-compatible
//! Chat Completions API, handling message conversion, JSON mode, and response
//! parsing.
//!
//! # Example
//!
//! ```rust,ignore
//! use echoclaw::providers::{groq::GroqProvider, ChatOptions, LLMProvider};
//! use echoclaw::session::Message;
//!
//! async fn example() {
//!     let provider = GroqProvider::new("gsk-xxx");
//!
//!     let messages = vec![
//!         Message::system("You are a helpful assistant."),
//!         Message::user("Hello!"),
//!     ];
//!
//!     let response = provider
//!         .chat(messages, None, ChatOptions::default())
//!         .await
//!         .unwrap();
//!
//!     println!("Groq: {}", response.content);
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::session::{Message, Role};

use super::{parse_provider_error, ChatOptions, LLMProvider, LLMResponse, Usage};

/// The Groq API endpoint URL (OpenAI-compatible).
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1";

/// The default Groq model for conversation steps.
const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

// ============================================================================
// Groq API Request Types
// ============================================================================

/// Groq API request body.
#[derive(Debug, Serialize)]
struct GroqRequest {
    /// Model identifier
    model: String,
    /// Conversation messages (including system)
    messages: Vec<GroqMessage>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Top-p (nucleus) sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    /// Stop sequences
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
    /// Response format constraint (`{"type": "json_object"}` in JSON mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<GroqResponseFormat>,
}

/// A message in Groq's (OpenAI-compatible) format.
#[derive(Debug, Serialize)]
struct GroqMessage {
    /// Role: "system", "user", or "assistant"
    role: String,
    /// Message content
    content: String,
}

/// Response format constraint.
#[derive(Debug, Serialize)]
struct GroqResponseFormat {
    /// Format type (always "json_object")
    r#type: String,
}

// ============================================================================
// Groq API Response Types
// ============================================================================

/// Groq API response body.
#[derive(Debug, Deserialize)]
struct GroqResponse {
    /// Response choices
    choices: Vec<GroqChoice>,
    /// Token usage
    usage: Option<GroqUsage>,
}

/// A choice in the response.
#[derive(Debug, Deserialize)]
struct GroqChoice {
    /// The message content
    message: GroqResponseMessage,
}

/// A message in the response.
#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    /// Text content (null has been observed on filtered replies)
    content: Option<String>,
}

/// Groq token usage.
#[derive(Debug, Deserialize)]
struct GroqUsage {
    /// Tokens in the prompt
    prompt_tokens: u32,
    /// Tokens in the completion
    completion_tokens: u32,
}

/// Groq API error response.
#[derive(Debug, Deserialize)]
struct GroqErrorResponse {
    error: GroqError,
}

/// Groq API error details.
#[derive(Debug, Deserialize)]
struct GroqError {
    message: String,
    r#type: String,
}

// ============================================================================
// Groq Provider
// ============================================================================

/// Groq LLM provider.
///
/// Implements the `LLMProvider` trait for Groq's OpenAI-compatible
/// Chat Completions API. Handles message format conversion, JSON mode,
/// and typed error classification.
pub struct GroqProvider {
    /// API key for authentication
    api_key: String,
    /// API base URL
    api_base: String,
    /// HTTP client for making requests
    client: Client,
}

impl GroqProvider {
    /// Create a new Groq provider with the given API key.
    ///
    /// Uses the default Groq API endpoint.
    ///
    /// # Example
    /// ```
    /// use echoclaw::providers::groq::GroqProvider;
    /// use echoclaw::providers::LLMProvider;
    ///
    /// let provider = GroqProvider::new("gsk-xxx");
    /// assert_eq!(provider.name(), "groq");
    /// ```
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_base: GROQ_API_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Create a new Groq provider with a custom base URL.
    ///
    /// This is useful for OpenAI-compatible gateways and local test servers.
    ///
    /// # Arguments
    /// * `api_key` - API key
    /// * `api_base` - Base URL for the API (trailing slash will be removed)
    ///
    /// # Example
    /// ```
    /// use echoclaw::providers::groq::GroqProvider;
    ///
    /// let provider = GroqProvider::with_base_url("gsk-xxx", "https://my-gateway.com/v1/");
    /// ```
    pub fn with_base_url(api_key: &str, api_base: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Base URL used for API requests.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert EchoClaw messages to Groq API format.
fn convert_messages(messages: Vec<Message>) -> Vec<GroqMessage> {
    messages
        .into_iter()
        .map(|msg| {
            let role = match msg.role {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
            }
            .to_string();

            GroqMessage {
                role,
                content: msg.content,
            }
        })
        .collect()
}

/// Convert a Groq API response to an EchoClaw LLMResponse.
fn convert_response(response: GroqResponse) -> LLMResponse {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    let mut llm_response = LLMResponse::text(&content);

    if let Some(usage) = response.usage {
        llm_response =
            llm_response.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
    }

    llm_response
}

// ============================================================================
// LLMProvider Implementation
// ============================================================================

#[async_trait]
impl LLMProvider for GroqProvider {
    async fn chat(
        &self,
        messages: Vec<Message>,
        model: Option<&str>,
        options: ChatOptions,
    ) -> Result<LLMResponse> {
        let model = model.unwrap_or(DEFAULT_MODEL);
        let groq_messages = convert_messages(messages);

        let request = GroqRequest {
            model: model.to_string(),
            messages: groq_messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            stop: options.stop,
            response_format: options.json_mode.then(|| GroqResponseFormat {
                r#type: "json_object".to_string(),
            }),
        };

        debug!("Groq request to model {}", model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the structured error message when the body parses
            if let Ok(error_response) = serde_json::from_str::<GroqErrorResponse>(&error_text) {
                let detail = format!(
                    "{} - {}",
                    error_response.error.r#type, error_response.error.message
                );
                return Err(parse_provider_error(status, &detail).into());
            }

            return Err(parse_provider_error(status, &error_text).into());
        }

        let groq_response: GroqResponse = response.json().await?;

        debug!("Groq response received from model {}", model);
        Ok(convert_response(groq_response))
    }

    fn default_model(&self) -> &str {
        DEFAULT_MODEL
    }

    fn name(&self) -> &str {
        "groq"
    }
}

// ============================================================================
// Tests
// ============================================================================
