//! Agent module - the voice-driven coding agent loop
//!
//! This module provides the conversation engine for EchoClaw. The agent is
//! responsible for:
//!
//! - Turning one user utterance into one protocol turn
//! - Driving plan/action/observe/complete steps against the model
//! - Executing requested tools and recording their outcomes in history
//! - Compressing the conversation when it outgrows the context budget
//! - Speaking every user-facing line through the perception layer
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Listener  │────>│  AgentLoop  │────>│ LLMProvider │
//! │ (mic / tty) │     │             │     │   (Groq)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Speaker   │     │    Tools    │
//!                     │ (tts / tty) │     │  Registry   │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use echoclaw::agent::AgentLoop;
//! use echoclaw::audio::{ConsoleListener, ConsoleSpeaker};
//! use echoclaw::config::Config;
//! use echoclaw::providers::GroqProvider;
//!
//! async fn run_agent() {
//!     let config = Config::default();
//!     let provider = Arc::new(GroqProvider::new("your-api-key"));
//!     let mut agent = AgentLoop::new(
//!         &config,
//!         provider,
//!         Box::new(ConsoleListener::new()),
//!         Box::new(ConsoleSpeaker),
//!     );
//!     agent.run().await.unwrap();
//! }
//! ```

mod context;
mod r#loop;
pub mod prompts;
mod protocol;
mod retry;

pub use context::ContextManager;
pub use protocol::{StepResponse, ToolOutputRecord};
pub use r#loop::{is_exit_command, AgentLoop};
pub use retry::RetryPolicy;
