//! Context compression for conversation history
//!
//! Keeps the conversation history bounded so it never overflows the model
//! context. When the total content length crosses the configured threshold,
//! the messages between the system prompt and the recent tail are replaced
//! with a single model-generated summary. Compression failure is never
//! allowed to corrupt or drop history; on any error the original messages
//! are kept unchanged.

use crate::config::AgentConfig;
use crate::error::Result;
use crate::log_component;
use crate::providers::{ChatOptions, LLMProvider};
use crate::session::{Conversation, Message};

use super::prompts::{CONTEXT_SUMMARY_PREFIX, SUMMARY_PROMPT};

/// Decides when history is too large and compresses it in place.
///
/// The size check is a character-count proxy for token usage: cheap, stable,
/// and close enough for a compression trigger.
///
/// # Example
///
/// ```rust
/// use echoclaw::agent::ContextManager;
/// use echoclaw::config::AgentConfig;
/// use echoclaw::session::{Conversation, Message};
///
/// let manager = ContextManager::new(&AgentConfig::default());
/// let mut convo = Conversation::new("system prompt");
/// assert!(!manager.should_compress(&convo));
///
/// convo.push(Message::user(&"x".repeat(20_000)));
/// assert!(manager.should_compress(&convo));
/// ```
pub struct ContextManager {
    /// Total content length (chars) that triggers compression
    threshold: usize,
    /// Messages kept verbatim at the tail
    keep_recent: usize,
    /// Cheaper model used for the summary call
    summary_model: String,
    /// Token cap for the summary
    summary_max_tokens: u32,
    /// Sampling temperature for the summary call
    temperature: f32,
}

impl ContextManager {
    /// Create a manager from the agent configuration.
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            threshold: config.context_threshold,
            keep_recent: config.keep_recent,
            summary_model: config.summary_model.clone(),
            summary_max_tokens: config.summary_max_tokens,
            temperature: config.temperature,
        }
    }

    /// Whether the conversation has grown past the compression threshold.
    pub fn should_compress(&self, conversation: &Conversation) -> bool {
        conversation.total_content_len() > self.threshold
    }

    /// The configured compression threshold in characters.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Compress the conversation in place.
    ///
    /// Retains the system prompt and the last `keep_recent` messages
    /// unconditionally. Everything in between is sent to the summary model;
    /// the returned summary becomes a new system-tagged message inserted
    /// after the original system prompt.
    ///
    /// No-op when there is nothing between the head and the tail. If the
    /// summary call fails, the history is left exactly as it was.
    pub async fn compress(&self, provider: &dyn LLMProvider, conversation: &mut Conversation) {
        if conversation.message_count() <= self.keep_recent + 1 {
            return;
        }

        let messages = &conversation.messages;
        let tail_start = messages.len() - self.keep_recent;
        let middle = &messages[1..tail_start];
        let transcript = middle
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let before = conversation.message_count();
        match self.summarize(provider, &transcript).await {
            Ok(summary) => {
                let mut compressed = Vec::with_capacity(2 + self.keep_recent);
                compressed.push(messages[0].clone());
                compressed.push(Message::system(&format!(
                    "{}{}",
                    CONTEXT_SUMMARY_PREFIX, summary
                )));
                compressed.extend(messages[tail_start..].iter().cloned());
                conversation.replace(compressed);
                conversation.set_summary(&summary);
                log_component!(
                    info,
                    "agent",
                    "context compressed",
                    before = before as u64,
                    after = conversation.message_count() as u64
                );
            }
            Err(e) => {
                // Keep the full history; an oversized context beats a broken one.
                log_component!(
                    warn,
                    "agent",
                    "context compression failed, keeping full history",
                    error = e.to_string()
                );
            }
        }
    }

    /// Ask the summary model for a digest of the middle transcript.
    async fn summarize(&self, provider: &dyn LLMProvider, transcript: &str) -> Result<String> {
        let request = vec![Message::system(SUMMARY_PROMPT), Message::user(transcript)];
        let options = ChatOptions::new()
            .with_temperature(self.temperature)
            .with_max_tokens(self.summary_max_tokens);
        let response = provider
            .chat(request, Some(&self.summary_model), options)
            .await?;
        Ok(response.content)
    }
}
