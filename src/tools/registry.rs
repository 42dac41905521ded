//! Tool registry for EchoClaw
//!
//! This module provides the `ToolRegistry` struct for holding tools and
//! looking them up by name. `with_builtins` assembles the standard tool
//! set the agent advertises in its system prompt.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::process::ProcessTracker;

use super::command::RunCommandTool;
use super::filesystem::{
    CreateFolderTool, CurrentDirectoryTool, FindFilesTool, ListFilesTool, ReadFileTool,
    WriteFileTool,
};
use super::network::CheckPortTool;
use super::server::{RunServerTool, StopServersTool};
use super::Tool;

/// A registry that holds the available tools.
///
/// The registry allows tools to be registered and looked up by name.
/// Execution goes through [`super::ToolExecutor`], which adds logging
/// and the fail-soft dispatch path.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use echoclaw::process::ProcessTracker;
/// use echoclaw::tools::ToolRegistry;
///
/// let tracker = Arc::new(ProcessTracker::new());
/// let registry = ToolRegistry::with_builtins(tracker, 60);
///
/// assert!(registry.has("create_folder"));
/// assert!(registry.has("run_server"));
/// assert!(!registry.has("teleport"));
/// ```
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry populated with the built-in tool set.
    ///
    /// # Arguments
    /// * `tracker` - Shared process tracker for the server tools
    /// * `command_timeout_secs` - Default timeout for `run_command`
    pub fn with_builtins(tracker: Arc<ProcessTracker>, command_timeout_secs: u64) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RunCommandTool::new(command_timeout_secs)));
        registry.register(Box::new(CreateFolderTool));
        registry.register(Box::new(WriteFileTool));
        registry.register(Box::new(ReadFileTool));
        registry.register(Box::new(ListFilesTool));
        registry.register(Box::new(RunServerTool::new(Arc::clone(&tracker))));
        registry.register(Box::new(StopServersTool::new(tracker)));
        registry.register(Box::new(CurrentDirectoryTool));
        registry.register(Box::new(FindFilesTool));
        registry.register(Box::new(CheckPortTool));
        registry
    }

    /// Register a new tool in the registry.
    ///
    /// If a tool with the same name already exists, it will be replaced.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        debug!(tool = %name, "registering tool");
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Check if a tool exists in the registry.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the names of all registered tools, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
