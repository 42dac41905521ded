//! Shell command tool for EchoClaw
//!
//! This module provides the `run_command` tool. Commands are run through
//! `sh -c` with a configurable timeout, and `cd` is handled specially by
//! changing the process working directory so later tools inherit it.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{EchoError, Result};

use super::{input_str, Tool};

/// Commands that start long-running servers.
///
/// These would block `run_command` until its timeout expires, so the tool
/// redirects the model to `run_server` instead.
pub const SERVER_COMMANDS: &[&str] = &[
    "npm start",
    "npm run dev",
    "yarn start",
    "yarn dev",
    "flask run",
    "python -m flask run",
    "python app.py",
    "node server.js",
    "nodemon",
    "serve",
    "http-server",
];

/// Tool for executing shell commands.
///
/// Executes a shell command and returns the combined stdout and stderr
/// output. Commands are run using `sh -c` for shell interpretation.
///
/// # Input
/// - a bare command string, or
/// - `{"command": "...", "timeout": 30}`
///
/// # Example
/// ```rust
/// use echoclaw::tools::Tool;
/// use echoclaw::tools::command::RunCommandTool;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let tool = RunCommandTool::new(60);
/// let result = tool.execute(json!("echo hello")).await.unwrap();
/// assert_eq!(result.trim(), "hello");
/// # });
/// ```
pub struct RunCommandTool {
    default_timeout_secs: u64,
}

impl RunCommandTool {
    /// Create a new command tool with the given default timeout.
    pub fn new(default_timeout_secs: u64) -> Self {
        Self {
            default_timeout_secs,
        }
    }
}

/// Check whether a command line looks like it starts a server.
pub fn looks_like_server_command(command: &str) -> bool {
    let lowered = command.to_lowercase();
    SERVER_COMMANDS.iter().any(|sc| lowered.contains(sc))
}

#[async_trait]
impl Tool for RunCommandTool {
    fn name(&self) -> &str {
        "run_command"
    }

    fn description(&self) -> &str {
        "Execute a shell command and return its output"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                },
                "timeout": {
                    "type": "integer",
                    "description": "Timeout in seconds"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let command = input_str(&input, "command")
            .ok_or_else(|| EchoError::Tool("Missing 'command' input".into()))?;
        let timeout_secs = input
            .get("timeout")
            .and_then(|v| v.as_u64())
            .unwrap_or(self.default_timeout_secs);

        // cd changes the agent's own working directory so every later
        // tool call operates in the new location
        if let Some(path) = command.trim().strip_prefix("cd ") {
            return Ok(match std::env::set_current_dir(path.trim()) {
                Ok(()) => match std::env::current_dir() {
                    Ok(cwd) => format!("Changed directory to: {}", cwd.display()),
                    Err(e) => format!("Failed to change directory: {}", e),
                },
                Err(e) => format!("Failed to change directory: {}", e),
            });
        }

        if looks_like_server_command(&command) {
            return Ok(format!(
                "This looks like a server command. Use 'run_server' instead of 'run_command' for: {}",
                command
            ));
        }

        let child = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&command)
            .stdin(Stdio::null())
            .output();

        match tokio::time::timeout(Duration::from_secs(timeout_secs), child).await {
            Ok(Ok(output)) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                Ok(format!("{}{}", stdout, stderr))
            }
            Ok(Err(e)) => Ok(format!("Command failed: {}", e)),
            Err(_) => Ok(format!(
                "Command timed out after {} seconds: {}",
                timeout_secs, command
            )),
        }
    }
}
