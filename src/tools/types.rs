//! Tool types for EchoClaw
//!
//! This module defines the `Tool` trait that all tools must implement.
//! Tool input arrives as the raw JSON value from the model's action step,
//! so most tools accept either a bare string or an object form.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Trait that all tools must implement.
///
/// Tools are executable functions the model can request through an action
/// step, like creating folders, running commands, or starting servers.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use echoclaw::tools::Tool;
/// use echoclaw::error::Result;
///
/// struct GreetTool;
///
/// #[async_trait]
/// impl Tool for GreetTool {
///     fn name(&self) -> &str { "greet" }
///     fn description(&self) -> &str { "Greets the given name" }
///     fn parameters(&self) -> Value {
///         serde_json::json!({
///             "type": "object",
///             "properties": {
///                 "name": { "type": "string" }
///             },
///             "required": ["name"]
///         })
///     }
///     async fn execute(&self, input: Value) -> Result<String> {
///         let name = input.as_str().unwrap_or("stranger");
///         Ok(format!("Hello, {}!", name))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name.
    ///
    /// This name is matched against the `tool` field of an action step.
    /// It should be unique within a registry.
    fn name(&self) -> &str;

    /// Get the tool description.
    ///
    /// Shown in the `tools` CLI listing and usable in prompt text.
    fn description(&self) -> &str;

    /// Get the JSON schema for the tool's input.
    ///
    /// This schema describes what input the tool accepts.
    /// It follows the JSON Schema specification.
    fn parameters(&self) -> Value;

    /// Execute the tool with the given input.
    ///
    /// # Arguments
    /// * `input` - The raw JSON input from the model's action step
    ///
    /// # Returns
    /// A human-readable result string. Operational failures (missing file,
    /// failed command) are reported inside the string; `Err` is reserved
    /// for inputs the tool cannot interpret at all.
    async fn execute(&self, input: Value) -> Result<String>;
}

/// Extract a string argument from tool input.
///
/// Accepts either a bare JSON string or an object carrying the value
/// under `key`. The model uses both forms interchangeably.
pub(crate) fn input_str(input: &Value, key: &str) -> Option<String> {
    if let Some(s) = input.as_str() {
        return Some(s.to_string());
    }
    input
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
