//! EchoClaw - Voice-driven coding agent

pub mod agent;
pub mod audio;
pub mod config;
pub mod error;
pub mod process;
pub mod providers;
pub mod session;
pub mod tools;
pub mod utils;

pub use agent::{AgentLoop, ContextManager, RetryPolicy, StepResponse};
pub use audio::{Listener, Speaker};
pub use config::Config;
pub use error::{AudioError, EchoError, ProviderError, Result};
pub use providers::{ChatOptions, GroqProvider, LLMProvider, LLMResponse, Usage};
pub use session::{Conversation, Message, Role};
