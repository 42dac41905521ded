//! Session types for EchoClaw
//!
//! This module defines the core types for conversation state management:
//! messages, roles, and the in-memory conversation history the agent loop
//! and context manager operate on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The in-memory conversation state for one agent session.
///
/// Holds the ordered message history plus the most recent context summary,
/// if compression has run. The first message is always the system prompt;
/// history is append-only except when the context manager replaces it with
/// a compressed version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Ordered list of messages in this conversation
    pub messages: Vec<Message>,
    /// Summary produced by the most recent context compression, if any
    pub summary: Option<String>,
    /// When this conversation was started
    pub created_at: DateTime<Utc>,
    /// When this conversation was last modified
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new conversation seeded with the system prompt.
    ///
    /// # Example
    /// ```
    /// use echoclaw::session::{Conversation, Role};
    ///
    /// let convo = Conversation::new("You are a helpful assistant.");
    /// assert_eq!(convo.messages.len(), 1);
    /// assert_eq!(convo.messages[0].role, Role::System);
    /// ```
    pub fn new(system_prompt: &str) -> Self {
        let now = Utc::now();
        Self {
            messages: vec![Message::system(system_prompt)],
            summary: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message to the history.
    ///
    /// Also updates the `updated_at` timestamp.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    /// Replace the full message history.
    ///
    /// Only the context manager should call this, after compression.
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.updated_at = Utc::now();
    }

    /// Record the summary produced by a compression pass.
    pub fn set_summary(&mut self, summary: &str) {
        self.summary = Some(summary.to_string());
        self.updated_at = Utc::now();
    }

    /// Sum of content lengths across all messages.
    ///
    /// A cheap character-count proxy for token usage, used by the context
    /// manager's compression trigger.
    pub fn total_content_len(&self) -> usize {
        self.messages.iter().map(|m| m.content.len()).sum()
    }

    /// Get the number of messages in this conversation.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Get the last message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Who authored this message
    pub role: Role,
    /// Message text content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: &str) -> Self {
        Self {
            role: Role::System,
            content: content.to_string(),
        }
    }

    /// Create a user message.
    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
        }
    }
}

/// The author of a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System prompt or injected context summary
    System,
    /// End user (also carries synthetic tool_output records, matching the
    /// wire format the step protocol expects)
    User,
    /// Model output
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ────────────────────────── Message / Role ──────────────────────────

    #[test]
    fn test_message_constructors() {
        let sys = Message::system("prompt");
        assert_eq!(sys.role, Role::System);
        assert_eq!(sys.content, "prompt");

        let user = Message::user("hi");
        assert_eq!(user.role, Role::User);

        let asst = Message::assistant("hello");
        assert_eq!(asst.role, Role::Assistant);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = Message::user("hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""role":"user""#));

        let msg = Message::system("s");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""role":"system""#));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::System.to_string(), "system");
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_message_roundtrip() {
        let msg = Message::assistant("step output");
        let json = serde_json::to_string(&msg).unwrap();
        let restored: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, msg);
    }

    // ────────────────────────── Conversation ──────────────────────────

    #[test]
    fn test_conversation_starts_with_system_prompt() {
        let convo = Conversation::new("You are a coding assistant.");
        assert_eq!(convo.message_count(), 1);
        assert_eq!(convo.messages[0].role, Role::System);
        assert_eq!(convo.messages[0].content, "You are a coding assistant.");
        assert!(convo.summary.is_none());
    }

    #[test]
    fn test_conversation_push() {
        let mut convo = Conversation::new("sys");
        convo.push(Message::user("build me an app"));
        convo.push(Message::assistant("{\"step\":\"plan\"}"));
        assert_eq!(convo.message_count(), 3);
        assert_eq!(convo.last_message().unwrap().role, Role::Assistant);
    }

    #[test]
    fn test_total_content_len() {
        let mut convo = Conversation::new("abc");
        convo.push(Message::user("de"));
        assert_eq!(convo.total_content_len(), 5);
    }

    #[test]
    fn test_replace_history() {
        let mut convo = Conversation::new("sys");
        for i in 0..20 {
            convo.push(Message::user(&format!("msg {}", i)));
        }
        let compressed = vec![Message::system("sys"), Message::user("tail")];
        convo.replace(compressed);
        assert_eq!(convo.message_count(), 2);
        assert_eq!(convo.messages[1].content, "tail");
    }

    #[test]
    fn test_set_summary() {
        let mut convo = Conversation::new("sys");
        convo.set_summary("built a todo app");
        assert_eq!(convo.summary.as_deref(), Some("built a todo app"));
    }
}
