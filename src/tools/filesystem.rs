//! Filesystem tools for EchoClaw
//!
//! This module provides tools for file system operations: creating folders,
//! reading and writing files, listing directories, finding files by pattern,
//! and reporting the working directory. Paths are resolved relative to the
//! process working directory, which `run_command`'s `cd` handling updates.
//!
//! Operational failures are reported in the result string rather than as
//! errors, so the model can see what went wrong and adjust.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{EchoError, Result};

use super::{input_str, Tool};

/// Absolute form of `path` for result messages.
///
/// Does not require the path to exist, so failure messages can still
/// name the location that was attempted.
fn absolute(path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(p))
            .unwrap_or_else(|_| p.to_path_buf())
    }
}

/// Tool for creating a folder (including parents).
///
/// # Input
/// - a bare path string, or `{"path": "..."}`
///
/// # Example
/// ```rust
/// use echoclaw::tools::Tool;
/// use echoclaw::tools::filesystem::CreateFolderTool;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let dir = tempfile::tempdir().unwrap();
/// let target = dir.path().join("demo");
/// let tool = CreateFolderTool;
/// let result = tool.execute(json!(target.to_str().unwrap())).await.unwrap();
/// assert!(result.starts_with("Folder created:"));
/// # });
/// ```
pub struct CreateFolderTool;

#[async_trait]
impl Tool for CreateFolderTool {
    fn name(&self) -> &str {
        "create_folder"
    }

    fn description(&self) -> &str {
        "Create a folder at the given path, including parent folders"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The folder path to create"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let path = input_str(&input, "path")
            .ok_or_else(|| EchoError::Tool("Missing 'path' input".into()))?;

        Ok(match tokio::fs::create_dir_all(&path).await {
            Ok(()) => format!("Folder created: {}", absolute(&path).display()),
            Err(e) => format!("Error creating folder: {}", e),
        })
    }
}

/// Tool for writing content to a file.
///
/// Creates parent directories as needed. An existing file is first
/// renamed to `<path>.backup` so one previous version survives.
///
/// # Input
/// - `{"path": "...", "content": "..."}` (both required)
pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file, backing up any existing version"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The file path to write"
                },
                "content": {
                    "type": "string",
                    "description": "The content to write"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let path = input.get("path").and_then(|v| v.as_str());
        let content = input.get("content").and_then(|v| v.as_str());

        let (path, content) = match (path, content) {
            (Some(p), Some(c)) if !p.is_empty() => (p, c),
            _ => return Ok("Invalid input: 'path' and 'content' are required.".to_string()),
        };

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    return Ok(format!("Error writing file: {}", e));
                }
            }
        }

        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            let backup_path = format!("{}.backup", path);
            if let Err(e) = tokio::fs::rename(path, &backup_path).await {
                return Ok(format!("Error writing file: {}", e));
            }
        }

        Ok(match tokio::fs::write(path, content).await {
            Ok(()) => format!("File written: {}", absolute(path).display()),
            Err(e) => format!("Error writing file: {}", e),
        })
    }
}

/// Tool for reading file contents.
///
/// # Input
/// - a bare path string, or `{"path": "..."}`
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a file at the given path"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The file path to read"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let path = input_str(&input, "path")
            .ok_or_else(|| EchoError::Tool("Missing 'path' input".into()))?;

        Ok(match tokio::fs::read_to_string(&path).await {
            Ok(content) => format!("File content ({}):\n{}", path, content),
            Err(e) => format!("Error reading file: {}", e),
        })
    }
}

/// Tool for listing directory contents with sizes.
///
/// Directories are suffixed with `/`; files carry their size in bytes.
///
/// # Input
/// - a bare path string, `{"path": "..."}`, or nothing (defaults to `.`)
pub struct ListFilesTool;

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List files and folders in a directory with sizes"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The directory to list (defaults to the current directory)"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let path = input_str(&input, "path").unwrap_or_else(|| ".".to_string());

        let mut read_dir = match tokio::fs::read_dir(&path).await {
            Ok(rd) => rd,
            Err(e) => return Ok(format!("Error listing files: {}", e)),
        };

        let mut items = Vec::new();
        loop {
            match read_dir.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name().to_string_lossy().to_string();
                    match entry.metadata().await {
                        Ok(meta) if meta.is_dir() => items.push(format!(" {}/", name)),
                        Ok(meta) => items.push(format!(" {} ({} bytes)", name, meta.len())),
                        Err(e) => items.push(format!(" {} (unreadable: {})", name, e)),
                    }
                }
                Ok(None) => break,
                Err(e) => return Ok(format!("Error listing files: {}", e)),
            }
        }
        items.sort();

        Ok(format!(
            "Contents of {}:\n{}",
            absolute(&path).display(),
            items.join("\n")
        ))
    }
}

/// Tool reporting the current working directory.
///
/// # Input
/// - ignored
pub struct CurrentDirectoryTool;

#[async_trait]
impl Tool for CurrentDirectoryTool {
    fn name(&self) -> &str {
        "get_current_directory"
    }

    fn description(&self) -> &str {
        "Report the current working directory"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _input: Value) -> Result<String> {
        let cwd = std::env::current_dir()?;
        Ok(format!("Current directory: {}", cwd.display()))
    }
}

/// Tool for finding files by glob pattern.
///
/// The pattern is joined onto the search path, so `*.html` with the
/// default path searches the current directory.
///
/// # Input
/// - a bare pattern string, or `{"pattern": "...", "path": "..."}`
pub struct FindFilesTool;

#[async_trait]
impl Tool for FindFilesTool {
    fn name(&self) -> &str {
        "find_files"
    }

    fn description(&self) -> &str {
        "Find files matching a glob pattern"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Glob pattern to match (e.g. *.html, **/*.js)"
                },
                "path": {
                    "type": "string",
                    "description": "Directory to search (defaults to the current directory)"
                }
            },
            "required": ["pattern"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let pattern = input_str(&input, "pattern")
            .ok_or_else(|| EchoError::Tool("Missing 'pattern' input".into()))?;
        let path = input
            .get("path")
            .and_then(|v| v.as_str())
            .unwrap_or(".")
            .to_string();

        let full_pattern = Path::new(&path).join(&pattern);
        let full_pattern = full_pattern.to_string_lossy();

        let paths = match glob::glob(&full_pattern) {
            Ok(paths) => paths,
            Err(e) => return Ok(format!("Error finding files: {}", e)),
        };

        let mut matches: Vec<String> = paths
            .filter_map(|entry| entry.ok())
            .map(|p| p.display().to_string())
            .collect();
        matches.sort();

        if matches.is_empty() {
            Ok(format!("No files found matching '{}'", pattern))
        } else {
            Ok(format!(
                "Found files matching '{}':\n{}",
                pattern,
                matches.join("\n")
            ))
        }
    }
}
