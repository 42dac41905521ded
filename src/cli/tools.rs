//! The `tools` command: list the built-in tool registry.

use std::sync::Arc;

use anyhow::Result;

use echoclaw::config::Config;
use echoclaw::process::ProcessTracker;
use echoclaw::tools::ToolRegistry;

/// Print every registered tool with its description.
pub(crate) fn cmd_tools() -> Result<()> {
    let config = Config::load().unwrap_or_default();
    let tracker = Arc::new(ProcessTracker::new());
    let registry = ToolRegistry::with_builtins(tracker, config.agent.command_timeout_secs);

    println!("Built-in tools ({}):", registry.len());
    println!();
    for name in registry.names() {
        if let Some(tool) = registry.get(name) {
            println!("  {:<22} {}", name, tool.description());
        }
    }
    Ok(())
}
