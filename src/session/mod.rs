//! Session module - conversation state management
//!
//! This module holds the in-memory conversation state the agent loop works
//! on: the ordered message history, roles, and the compression summary.
//!
//! # Example
//!
//! ```
//! use echoclaw::session::{Conversation, Message, Role};
//!
//! let mut convo = Conversation::new("You are a helpful assistant.");
//! convo.push(Message::user("Create a folder called demo"));
//! convo.push(Message::assistant("{\"step\":\"plan\"}"));
//!
//! assert_eq!(convo.message_count(), 3);
//! assert_eq!(convo.last_message().unwrap().role, Role::Assistant);
//! ```

mod types;

pub use types::*;
