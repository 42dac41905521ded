//! Process module - background process tracking
//!
//! This module tracks long-running child processes started by the server
//! tools (dev servers, watchers) so they can be stopped as a group. The
//! tracker is owned state: the agent loop creates one and hands an `Arc`
//! to the tools that need it, so there is no global mutable process list.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use echoclaw::process::ProcessTracker;
//!
//! async fn example() {
//!     let tracker = Arc::new(ProcessTracker::new());
//!
//!     let child = tokio::process::Command::new("sleep")
//!         .arg("60")
//!         .spawn()
//!         .unwrap();
//!     tracker.track(child, "sleep 60").await;
//!
//!     let stopped = tracker.stop_all().await;
//!     assert_eq!(stopped, 1);
//! }
//! ```

use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::log_component;

/// How long a process gets to exit after SIGTERM before it is killed.
const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A background process under management.
struct TrackedProcess {
    /// Process handle; kept so the child is reaped rather than zombied
    child: Child,
    /// OS process ID at spawn time (None if the child already exited)
    pid: Option<u32>,
    /// Command line the process was started with, for logging
    command: String,
}

/// Tracks background child processes and stops them as a group.
///
/// `stop_all` terminates gracefully first (SIGTERM), waits a bounded
/// time, then force-kills stragglers. The tracked set is cleared
/// unconditionally so a failed kill cannot wedge the tracker.
pub struct ProcessTracker {
    children: Mutex<Vec<TrackedProcess>>,
}

impl ProcessTracker {
    /// Create a new, empty process tracker.
    pub fn new() -> Self {
        Self {
            children: Mutex::new(Vec::new()),
        }
    }

    /// Register a spawned child process.
    ///
    /// Returns the OS pid if the child is still running.
    pub async fn track(&self, child: Child, command: &str) -> Option<u32> {
        let pid = child.id();
        log_component!(
            debug,
            "process",
            "tracking background process",
            pid = pid.unwrap_or(0),
            command = command
        );
        self.children.lock().await.push(TrackedProcess {
            child,
            pid,
            command: command.to_string(),
        });
        pid
    }

    /// Number of processes currently tracked.
    ///
    /// Counts tracked entries, including processes that may have exited
    /// on their own since being registered.
    pub async fn count(&self) -> usize {
        self.children.lock().await.len()
    }

    /// Stop all tracked processes.
    ///
    /// Sends SIGTERM to each process, waits up to five seconds for it to
    /// exit, then force-kills it. Returns the number of processes that
    /// were tracked. The tracked set is always left empty afterwards.
    pub async fn stop_all(&self) -> usize {
        let drained: Vec<TrackedProcess> = {
            let mut children = self.children.lock().await;
            children.drain(..).collect()
        };

        let total = drained.len();
        if total == 0 {
            return 0;
        }

        for mut tracked in drained {
            if let Some(pid) = tracked.pid {
                send_sigterm(pid).await;
            }

            match tokio::time::timeout(GRACEFUL_SHUTDOWN_TIMEOUT, tracked.child.wait()).await {
                Ok(Ok(status)) => {
                    debug!(
                        command = %tracked.command,
                        status = %status,
                        "background process exited"
                    );
                }
                Ok(Err(e)) => {
                    warn!(
                        command = %tracked.command,
                        error = %e,
                        "failed waiting on background process"
                    );
                }
                Err(_) => {
                    log_component!(
                        warn,
                        "process",
                        "process did not exit in time, killing",
                        pid = tracked.pid.unwrap_or(0)
                    );
                    if let Err(e) = tracked.child.kill().await {
                        warn!(command = %tracked.command, error = %e, "kill failed");
                    }
                }
            }
        }

        log_component!(info, "process", "stopped background processes", count = total as u64);
        total
    }
}

impl Default for ProcessTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Send SIGTERM to a pid via the `kill` utility.
///
/// `tokio::process::Child` only exposes SIGKILL directly; going through
/// `kill(1)` lets the child run its shutdown handlers first.
async fn send_sigterm(pid: u32) {
    match Command::new("kill").arg(pid.to_string()).status().await {
        Ok(status) if status.success() => {}
        Ok(status) => {
            // Usually means the process already exited
            debug!(pid, %status, "kill(1) returned non-zero");
        }
        Err(e) => {
            warn!(pid, error = %e, "failed to invoke kill(1)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_sleep(secs: u64) -> Child {
        Command::new("sleep")
            .arg(secs.to_string())
            .spawn()
            .expect("spawn sleep")
    }

    #[tokio::test]
    async fn test_tracker_starts_empty() {
        let tracker = ProcessTracker::new();
        assert_eq!(tracker.count().await, 0);
        assert_eq!(tracker.stop_all().await, 0);
    }

    #[tokio::test]
    async fn test_track_returns_pid() {
        let tracker = ProcessTracker::new();
        let child = spawn_sleep(30);
        let pid = tracker.track(child, "sleep 30").await;
        assert!(pid.is_some());
        assert_eq!(tracker.count().await, 1);

        tracker.stop_all().await;
    }

    #[tokio::test]
    async fn test_stop_all_terminates_and_clears() {
        let tracker = ProcessTracker::new();
        tracker.track(spawn_sleep(30), "sleep 30").await;
        tracker.track(spawn_sleep(30), "sleep 30").await;
        assert_eq!(tracker.count().await, 2);

        let stopped = tracker.stop_all().await;
        assert_eq!(stopped, 2);
        assert_eq!(tracker.count().await, 0);
    }

    #[tokio::test]
    async fn test_stop_all_handles_already_exited_process() {
        let tracker = ProcessTracker::new();
        let mut child = Command::new("true").spawn().expect("spawn true");
        // Let it finish before tracking
        let _ = child.wait().await;
        tracker.track(child, "true").await;

        let stopped = tracker.stop_all().await;
        assert_eq!(stopped, 1);
        assert_eq!(tracker.count().await, 0);
    }

    #[tokio::test]
    async fn test_stop_all_is_idempotent() {
        let tracker = ProcessTracker::new();
        tracker.track(spawn_sleep(30), "sleep 30").await;

        assert_eq!(tracker.stop_all().await, 1);
        assert_eq!(tracker.stop_all().await, 0);
    }
}
