//! Server tools for EchoClaw
//!
//! This module provides the `run_server` and `stop_servers` tools. Servers
//! are started in the background through `sh -c` and registered with the
//! shared [`ProcessTracker`] so `stop_servers` can terminate them as a group.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{EchoError, Result};
use crate::process::ProcessTracker;

use super::{input_str, Tool};

/// Tool for starting a long-running server in the background.
///
/// The spawned process is detached from the conversation turn; its output
/// is discarded rather than piped, so a chatty dev server cannot fill a
/// pipe buffer and stall.
///
/// # Input
/// - a bare command string, or `{"command": "..."}`
pub struct RunServerTool {
    tracker: Arc<ProcessTracker>,
}

impl RunServerTool {
    /// Create a new server tool backed by the given tracker.
    pub fn new(tracker: Arc<ProcessTracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl Tool for RunServerTool {
    fn name(&self) -> &str {
        "run_server"
    }

    fn description(&self) -> &str {
        "Start a long-running server command in the background"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The server command to start (e.g. npm start)"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let command = input_str(&input, "command")
            .ok_or_else(|| EchoError::Tool("Missing 'command' input".into()))?;

        let spawned = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        Ok(match spawned {
            Ok(child) => {
                let pid = self.tracker.track(child, &command).await;
                format!(
                    "Server started (PID: {}): {}",
                    pid.map(|p| p.to_string()).unwrap_or_else(|| "?".to_string()),
                    command
                )
            }
            Err(e) => format!("Error starting server: {}", e),
        })
    }
}

/// Tool for stopping all tracked background servers.
///
/// # Input
/// - ignored
pub struct StopServersTool {
    tracker: Arc<ProcessTracker>,
}

impl StopServersTool {
    /// Create a new stop tool backed by the given tracker.
    pub fn new(tracker: Arc<ProcessTracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl Tool for StopServersTool {
    fn name(&self) -> &str {
        "stop_servers"
    }

    fn description(&self) -> &str {
        "Stop all background servers started by run_server"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _input: Value) -> Result<String> {
        let stopped = self.tracker.stop_all().await;
        Ok(format!("Stopped {} running processes", stopped))
    }
}
