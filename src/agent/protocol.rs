//! Step protocol types for EchoClaw
//!
//! The model replies to every request with a single JSON object tagged by a
//! `step` field: `plan`, `action`, `observe`, or `complete`. This module
//! decodes that wire shape into the [`StepResponse`] enum the agent loop
//! dispatches on, and encodes the synthetic [`ToolOutputRecord`] appended to
//! history after each tool call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EchoError, Result};

/// A single decoded step from the model.
///
/// Decoded once from the wire JSON so the loop can match exhaustively
/// instead of string-comparing tags at each branch. A reply that is valid
/// JSON but carries an unrecognized (or missing) `step` tag decodes to
/// `Unknown`; a reply that is not valid JSON at all is a protocol error and
/// goes through the retry policy instead.
///
/// # Example
///
/// ```rust
/// use echoclaw::agent::StepResponse;
///
/// let step = StepResponse::parse(r#"{"step":"plan","content":"First I'll scaffold the app."}"#).unwrap();
/// assert!(matches!(step, StepResponse::Plan { .. }));
///
/// // Valid JSON, unknown tag: decodes, does not error
/// let step = StepResponse::parse(r#"{"step":"reticulate"}"#).unwrap();
/// assert!(matches!(step, StepResponse::Unknown));
///
/// // Not JSON: protocol error, retried by the caller
/// assert!(StepResponse::parse("I think we should...").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum StepResponse {
    /// The model states its strategy; spoken, then the loop asks for more.
    Plan {
        /// Natural-language reasoning to speak to the user
        content: String,
    },
    /// The model requests a tool invocation.
    Action {
        /// Name of the registered tool to run
        tool: String,
        /// Raw tool input, passed through to the executor unmodified
        input: Value,
    },
    /// The model reviews prior results; spoken, then the loop asks for more.
    Observe {
        /// Natural-language reflection to speak to the user
        content: String,
    },
    /// The model declares the request finished; spoken, turn ends.
    Complete {
        /// Closing summary to speak to the user
        content: String,
    },
    /// Valid JSON with an unrecognized step tag; ends the turn politely.
    Unknown,
}

impl StepResponse {
    /// Decode a raw model reply into a step.
    ///
    /// # Errors
    /// Returns `EchoError::Protocol` when the reply is not valid JSON.
    /// A structurally valid object with an unexpected tag is NOT an error;
    /// it decodes to [`StepResponse::Unknown`].
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| EchoError::Protocol(format!("reply is not valid JSON: {}", e)))?;

        let step = value.get("step").and_then(Value::as_str).unwrap_or_default();
        let content = || {
            value
                .get("content")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Ok(match step {
            "plan" => StepResponse::Plan { content: content() },
            "action" => StepResponse::Action {
                tool: value
                    .get("tool")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                input: value.get("input").cloned().unwrap_or(Value::Null),
            },
            "observe" => StepResponse::Observe { content: content() },
            "complete" => StepResponse::Complete { content: content() },
            _ => StepResponse::Unknown,
        })
    }

    /// The wire tag for this step, for logging.
    pub fn tag(&self) -> &'static str {
        match self {
            StepResponse::Plan { .. } => "plan",
            StepResponse::Action { .. } => "action",
            StepResponse::Observe { .. } => "observe",
            StepResponse::Complete { .. } => "complete",
            StepResponse::Unknown => "unknown",
        }
    }
}

/// The synthetic record appended to history after a tool call.
///
/// Carries the tool name and input back to the model as a user-role message.
/// The `output` field is always `"success"`: the model is deliberately not
/// told whether the tool failed internally, matching the loop's fail-soft
/// tool dispatch.
///
/// # Example
///
/// ```rust
/// use echoclaw::agent::ToolOutputRecord;
/// use serde_json::json;
///
/// let record = ToolOutputRecord::success("create_folder", json!("demo"));
/// let wire = record.render().unwrap();
/// assert!(wire.contains(r#""step":"tool_output""#));
/// assert!(wire.contains(r#""output":"success""#));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolOutputRecord {
    /// Always `"tool_output"`
    pub step: String,
    /// The tool that was invoked
    pub tool: String,
    /// The input the tool was invoked with
    pub input: Value,
    /// Always `"success"`
    pub output: String,
}

impl ToolOutputRecord {
    /// Build the record for a dispatched tool call.
    pub fn success(tool: &str, input: Value) -> Self {
        Self {
            step: "tool_output".to_string(),
            tool: tool.to_string(),
            input,
            output: "success".to_string(),
        }
    }

    /// Serialize to the wire JSON carried in a user-role message.
    pub fn render(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plan() {
        let step = StepResponse::parse(r#"{"step":"plan","content":"Setting up."}"#).unwrap();
        assert_eq!(
            step,
            StepResponse::Plan {
                content: "Setting up.".to_string()
            }
        );
        assert_eq!(step.tag(), "plan");
    }

    #[test]
    fn test_parse_action_with_string_input() {
        let step = StepResponse::parse(
            r#"{"step":"action","tool":"create_folder","input":"todo-app"}"#,
        )
        .unwrap();
        assert_eq!(
            step,
            StepResponse::Action {
                tool: "create_folder".to_string(),
                input: json!("todo-app"),
            }
        );
    }

    #[test]
    fn test_parse_action_with_object_input() {
        let step = StepResponse::parse(
            r#"{"step":"action","tool":"write_file","input":{"path":"app.py","content":"print(1)"}}"#,
        )
        .unwrap();
        match step {
            StepResponse::Action { tool, input } => {
                assert_eq!(tool, "write_file");
                assert_eq!(input["path"], "app.py");
            }
            other => panic!("expected action, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_action_missing_fields_defaults() {
        // Tool and input can be absent; the loop rejects the empty tool name
        // at dispatch time as unregistered.
        let step = StepResponse::parse(r#"{"step":"action"}"#).unwrap();
        assert_eq!(
            step,
            StepResponse::Action {
                tool: String::new(),
                input: Value::Null,
            }
        );
    }

    #[test]
    fn test_parse_observe_and_complete() {
        let step = StepResponse::parse(r#"{"step":"observe","content":"Looks good."}"#).unwrap();
        assert_eq!(step.tag(), "observe");

        let step = StepResponse::parse(r#"{"step":"complete","content":"All done!"}"#).unwrap();
        assert_eq!(
            step,
            StepResponse::Complete {
                content: "All done!".to_string()
            }
        );
    }

    #[test]
    fn test_parse_missing_content_defaults_empty() {
        let step = StepResponse::parse(r#"{"step":"plan"}"#).unwrap();
        assert_eq!(
            step,
            StepResponse::Plan {
                content: String::new()
            }
        );
    }

    #[test]
    fn test_parse_unknown_tag() {
        let step = StepResponse::parse(r#"{"step":"daydream","content":"..."}"#).unwrap();
        assert_eq!(step, StepResponse::Unknown);
    }

    #[test]
    fn test_parse_missing_tag() {
        let step = StepResponse::parse(r#"{"content":"no step here"}"#).unwrap();
        assert_eq!(step, StepResponse::Unknown);
    }

    #[test]
    fn test_parse_non_object_json() {
        // Valid JSON that is not an object has no step tag
        assert_eq!(StepResponse::parse("42").unwrap(), StepResponse::Unknown);
        assert_eq!(
            StepResponse::parse(r#""a string""#).unwrap(),
            StepResponse::Unknown
        );
    }

    #[test]
    fn test_parse_invalid_json_is_protocol_error() {
        let err = StepResponse::parse("not json at all").unwrap_err();
        assert!(matches!(err, EchoError::Protocol(_)));
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_parse_truncated_json_is_protocol_error() {
        let err = StepResponse::parse(r#"{"step":"plan","content":"cut of"#).unwrap_err();
        assert!(matches!(err, EchoError::Protocol(_)));
    }

    #[test]
    fn test_tool_output_record_wire_shape() {
        let record = ToolOutputRecord::success("check_port", json!(3000));
        let wire = record.render().unwrap();
        let parsed: Value = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed["step"], "tool_output");
        assert_eq!(parsed["tool"], "check_port");
        assert_eq!(parsed["input"], 3000);
        assert_eq!(parsed["output"], "success");
    }

    #[test]
    fn test_tool_output_record_roundtrip() {
        let record = ToolOutputRecord::success("list_files", json!({"path": "."}));
        let wire = record.render().unwrap();
        let restored: ToolOutputRecord = serde_json::from_str(&wire).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_tool_output_always_success() {
        // The record never carries failure detail, whatever the tool did.
        let record = ToolOutputRecord::success("run_command", json!("exit 1"));
        assert_eq!(record.output, "success");
    }
}
