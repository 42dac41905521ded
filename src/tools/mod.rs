//! Tools module - tool definitions and execution for action steps
//!
//! This module provides the infrastructure for defining and executing the
//! tools the model can request through an action step: folder and file
//! operations, shell commands, background servers, and port checks.
//!
//! # Overview
//!
//! - `Tool` trait: The interface that all tools must implement
//! - `ToolRegistry`: Holds the available tools, with a built-in set
//! - `ToolExecutor`: Dispatches action steps, with a fail-soft path
//!
//! # Built-in Tools
//!
//! - `run_command`: Execute a shell command (with `cd` handling)
//! - `create_folder`: Create a folder, including parents
//! - `write_file`: Write a file, backing up any existing version
//! - `read_file`: Read file contents
//! - `list_files`: List a directory with sizes
//! - `run_server`: Start a background server process
//! - `stop_servers`: Stop all tracked background servers
//! - `get_current_directory`: Report the working directory
//! - `find_files`: Find files by glob pattern
//! - `check_port`: Check whether a local TCP port is in use
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use echoclaw::process::ProcessTracker;
//! use echoclaw::tools::{ToolExecutor, ToolRegistry};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let tracker = Arc::new(ProcessTracker::new());
//! let registry = Arc::new(ToolRegistry::with_builtins(tracker, 60));
//! let executor = ToolExecutor::new(registry);
//!
//! let result = executor.safe_execute("get_current_directory", json!(null)).await;
//! assert!(result.is_some());
//! # });
//! ```

pub mod command;
mod executor;
pub mod filesystem;
pub mod network;
mod registry;
pub mod server;
mod types;

pub use command::SERVER_COMMANDS;
pub use executor::ToolExecutor;
pub use registry::ToolRegistry;
pub use types::Tool;

pub(crate) use types::input_str;
