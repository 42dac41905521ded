//! CLI smoke tests — verify all commands that work without API keys.
//!
//! These tests run the compiled binary and verify exit codes and output.
//! No external API keys or network access required.

use std::process::Command;

/// Helper: run echoclaw with given args and return (exit_code, stdout, stderr).
///
/// The Groq key is scrubbed from the environment so the session commands
/// exercise their missing-key error path instead of opening a microphone.
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let bin = env!("CARGO_BIN_EXE_echoclaw");
    let output = Command::new(bin)
        .args(args)
        .env("RUST_LOG", "") // suppress tracing noise
        .env_remove("GROQ_API_KEY")
        .env_remove("ECHOCLAW_PROVIDERS_GROQ_API_KEY")
        .output()
        .expect("failed to execute echoclaw binary");
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

// ============================================================================
// Help & Version
// ============================================================================

#[test]
fn cli_help_flag() {
    let (code, stdout, _stderr) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("echoclaw"));
}

#[test]
fn cli_version_flag() {
    let (code, stdout, _stderr) = run_cli(&["--version"]);
    assert_eq!(code, 0);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Tools
// ============================================================================

#[test]
fn cli_tools_lists_all_builtins() {
    let (code, stdout, _stderr) = run_cli(&["tools"]);
    assert_eq!(code, 0);
    for name in [
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
    ] {
        assert!(stdout.contains(name), "missing tool in listing: {}", name);
    }
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn cli_config_path() {
    let (code, stdout, _stderr) = run_cli(&["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.contains(".echoclaw"));
}

#[test]
fn cli_config_show() {
    let (code, stdout, _stderr) = run_cli(&["config", "show"]);
    assert_eq!(code, 0);
    // Renders the full configuration tree, defaults included
    assert!(stdout.contains("\"agent\""));
    assert!(stdout.contains("\"audio\""));
}

// ============================================================================
// Session startup failure paths
// ============================================================================

#[test]
fn cli_run_without_key_fails_with_guidance() {
    let (code, _stdout, stderr) = run_cli(&["run", "--text"]);
    assert_ne!(code, 0);
    assert!(
        stderr.contains("No Groq API key"),
        "Expected missing-key guidance, got stderr: {}",
        stderr
    );
}

#[test]
fn cli_run_help() {
    let (code, stdout, _stderr) = run_cli(&["run", "--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("--text"));
    assert!(stdout.contains("--config"));
}

// ============================================================================
// Invalid commands & edge cases
// ============================================================================

#[test]
fn cli_invalid_command() {
    let (code, _stdout, stderr) = run_cli(&["nonexistent-command"]);
    assert_ne!(code, 0);
    assert!(
        stderr.contains("error") || stderr.contains("unrecognized"),
        "Expected error message for invalid command, got stderr: {}",
        stderr
    );
}
