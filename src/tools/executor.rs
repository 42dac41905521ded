//! Tool execution for EchoClaw
//!
//! This module provides the `ToolExecutor`, the single dispatch point for
//! action steps. It wraps the registry with duration logging and offers a
//! fail-soft entry point (`safe_execute`) that converts any failure into
//! `None` so a broken tool call cannot crash the conversation loop.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{error, info};

use crate::error::{EchoError, Result};

use super::ToolRegistry;

/// Executes tools from a shared registry.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use echoclaw::process::ProcessTracker;
/// use echoclaw::tools::{ToolExecutor, ToolRegistry};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let tracker = Arc::new(ProcessTracker::new());
/// let registry = Arc::new(ToolRegistry::with_builtins(tracker, 60));
/// let executor = ToolExecutor::new(registry);
///
/// let result = executor.safe_execute("get_current_directory", json!(null)).await;
/// assert!(result.unwrap().starts_with("Current directory:"));
/// # });
/// ```
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl ToolExecutor {
    /// Create a new executor over the given registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// The registry backing this executor.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute a tool by name.
    ///
    /// # Returns
    /// The tool's result string, or an error if the tool is unknown or
    /// rejected its input.
    pub async fn execute(&self, name: &str, input: Value) -> Result<String> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| EchoError::NotFound(format!("Tool not found: {}", name)))?;

        let start = Instant::now();
        match tool.execute(input).await {
            Ok(output) => {
                info!(
                    tool = name,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "tool executed"
                );
                Ok(output)
            }
            Err(e) => {
                error!(
                    tool = name,
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "tool execution failed"
                );
                Err(e)
            }
        }
    }

    /// Execute a tool, swallowing failures.
    ///
    /// Any error (unknown tool, rejected input, panicking I/O) is logged
    /// and reported as `None`, keeping the conversation loop alive.
    pub async fn safe_execute(&self, name: &str, input: Value) -> Option<String> {
        match self.execute(name, input).await {
            Ok(output) => Some(output),
            Err(e) => {
                error!(tool = name, error = %e, "tool call swallowed");
                None
            }
        }
    }
}
