//! Network tools for EchoClaw
//!
//! This module provides the `check_port` tool, which probes whether a local
//! TCP port is accepting connections.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpStream;

use crate::error::{EchoError, Result};

use super::Tool;

/// How long to wait for the probe connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Tool for checking whether a local TCP port is in use.
///
/// Attempts a connection to `127.0.0.1:<port>`; an accepted connection
/// means something is listening there.
///
/// # Input
/// - a port number, a numeric string, or `{"port": 3000}`
pub struct CheckPortTool;

/// Pull a port number out of the tool input.
fn parse_port(input: &Value) -> Option<u16> {
    let raw = if let Some(obj) = input.as_object() {
        obj.get("port")?
    } else {
        input
    };

    match raw {
        Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl Tool for CheckPortTool {
    fn name(&self) -> &str {
        "check_port"
    }

    fn description(&self) -> &str {
        "Check whether a local TCP port is in use"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "port": {
                    "type": "integer",
                    "description": "The TCP port to check"
                }
            },
            "required": ["port"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let port = parse_port(&input)
            .ok_or_else(|| EchoError::Tool("Missing or invalid 'port' input".into()))?;

        let attempt = TcpStream::connect(("127.0.0.1", port));
        Ok(match tokio::time::timeout(CONNECT_TIMEOUT, attempt).await {
            Ok(Ok(_)) => format!("Port {} is in use", port),
            _ => format!("Port {} is available", port),
        })
    }
}
