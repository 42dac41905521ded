//! Integration tests for EchoClaw
//!
//! These tests verify that the various components work together correctly,
//! testing tool dispatch through the executor, the tracked process
//! lifecycle, protocol records, and configuration handling.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::tempdir;

use echoclaw::config::Config;
use echoclaw::error::{EchoError, Result};
use echoclaw::process::ProcessTracker;
use echoclaw::tools::{Tool, ToolExecutor, ToolRegistry};

fn executor() -> (ToolExecutor, Arc<ProcessTracker>) {
    let tracker = Arc::new(ProcessTracker::new());
    let registry = Arc::new(ToolRegistry::with_builtins(tracker.clone(), 60));
    (ToolExecutor::new(registry), tracker)
}

// ============================================================================
// Registry Integration Tests
// ============================================================================

#[test]
fn test_builtin_registry_has_exactly_the_ten_tools() {
    let tracker = Arc::new(ProcessTracker::new());
    let registry = ToolRegistry::with_builtins(tracker, 60);

    assert_eq!(
        registry.names(),
        vec![
            "check_port",
            "create_folder",
            "find_files",
            "get_current_directory",
            "list_files",
            "read_file",
            "run_command",
            "run_server",
            "stop_servers",
            "write_file",
        ]
    );
}

// ============================================================================
// Filesystem Tool Flow Tests
// ============================================================================

#[tokio::test]
async fn test_folder_and_file_flow() {
    let dir = tempdir().unwrap();
    let (executor, _tracker) = executor();

    let folder = dir.path().join("app/src");
    let result = executor
        .safe_execute("create_folder", json!(folder.to_string_lossy()))
        .await
        .unwrap();
    assert!(result.starts_with("Folder created:"));
    assert!(folder.is_dir());

    let file = folder.join("index.js");
    let result = executor
        .safe_execute(
            "write_file",
            json!({"path": file.to_string_lossy(), "content": "console.log('hi')"}),
        )
        .await
        .unwrap();
    assert!(result.starts_with("File written:"));

    let result = executor
        .safe_execute("read_file", json!(file.to_string_lossy()))
        .await
        .unwrap();
    assert!(result.contains("console.log('hi')"));
}

#[tokio::test]
async fn test_rewriting_a_file_keeps_a_backup() {
    let dir = tempdir().unwrap();
    let (executor, _tracker) = executor();
    let file = dir.path().join("config.json");

    for content in ["v1", "v2"] {
        executor
            .safe_execute(
                "write_file",
                json!({"path": file.to_string_lossy(), "content": content}),
            )
            .await
            .unwrap();
    }

    assert_eq!(std::fs::read_to_string(&file).unwrap(), "v2");
    let backup = dir.path().join("config.json.backup");
    assert_eq!(std::fs::read_to_string(&backup).unwrap(), "v1");
}

#[tokio::test]
async fn test_find_files_matches_pattern() {
    let dir = tempdir().unwrap();
    let (executor, _tracker) = executor();
    std::fs::write(dir.path().join("app.js"), "x").unwrap();
    std::fs::write(dir.path().join("readme.md"), "x").unwrap();

    let result = executor
        .safe_execute(
            "find_files",
            json!({"pattern": "*.js", "path": dir.path().to_string_lossy()}),
        )
        .await
        .unwrap();
    assert!(result.contains("app.js"));
    assert!(!result.contains("readme.md"));
}

// ============================================================================
// Command and Server Tool Tests
// ============================================================================

#[tokio::test]
async fn test_run_command_redirects_server_commands() {
    let (executor, tracker) = executor();

    let result = executor
        .safe_execute("run_command", json!("npm start"))
        .await
        .unwrap();

    assert!(result.contains("run_server"));
    assert_eq!(tracker.count().await, 0);
}

#[tokio::test]
async fn test_server_lifecycle_through_executor() {
    let (executor, tracker) = executor();

    let result = executor
        .safe_execute("run_server", json!("sleep 30"))
        .await
        .unwrap();
    assert!(result.starts_with("Server started (PID: "));
    assert_eq!(tracker.count().await, 1);

    let result = executor
        .safe_execute("stop_servers", json!(null))
        .await
        .unwrap();
    assert_eq!(result, "Stopped 1 running processes");
    assert_eq!(tracker.count().await, 0);
}

// ============================================================================
// Executor Fail-Soft Tests
// ============================================================================

struct ExplodingTool;

#[async_trait]
impl Tool for ExplodingTool {
    fn name(&self) -> &str {
        "explode"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    fn parameters(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value) -> Result<String> {
        Err(EchoError::Tool("boom".into()))
    }
}

#[tokio::test]
async fn test_safe_execute_contains_tool_failures() {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(ExplodingTool));
    let executor = ToolExecutor::new(Arc::new(registry));

    assert!(executor.safe_execute("explode", json!(null)).await.is_none());
}

#[tokio::test]
async fn test_safe_execute_unknown_tool() {
    let (executor, _tracker) = executor();
    assert!(executor.safe_execute("teleport", json!(null)).await.is_none());
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_config_loads_from_file_with_partial_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"agent": {"model": "llama-custom", "keep_recent": 4}}"#,
    )
    .unwrap();

    let config = Config::load_from_path(&path).unwrap();

    assert_eq!(config.agent.model, "llama-custom");
    assert_eq!(config.agent.keep_recent, 4);
    // Unspecified sections keep their defaults
    assert_eq!(config.agent.summary_model, "llama3-8b-8192");
    assert_eq!(config.audio.transcription.model, "whisper-large-v3");
}

#[test]
fn test_config_missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does-not-exist.json");

    let config = Config::load_from_path(&path).unwrap();

    assert_eq!(config.agent.context_threshold, 15_000);
    assert!(config.audio.speech.enabled);
}
