//! Process handle for managing subprocess lifecycle.

use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;
use tracing::warn;

use crate::types::{Error, Result};

/// Handle for managing a subprocess.
///
/// Provides methods to control the subprocess lifecycle (kill, wait, etc.)
/// without exposing the underlying Child object.
pub struct ProcessHandle {
    child: Child,
}

impl ProcessHandle {
    /// Create a new process handle from a Child process.
    pub fn new(child: Child) -> Self {
        Self { child }
    }

    /// Terminate the process.
    pub async fn kill(&mut self) -> Result<()> {
        self.child
            .kill()
            .await
            .map_err(|e| Error::Process(format!("Failed to kill process: {}", e)))
    }

    /// Wait for the process to exit and return its status.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        self.child
            .wait()
            .await
            .map_err(|e| Error::Process(format!("Failed to wait for process: {}", e)))
    }

    /// Wait up to `grace` for a clean exit, then kill the process.
    pub async fn shutdown(&mut self, grace: Duration) -> Result<()> {
        match tokio::time::timeout(grace, self.wait()).await {
            Ok(status) => {
                let status = status?;
                if !status.success() {
                    warn!("Claude CLI exited with {}", status);
                }
                Ok(())
            }
            Err(_) => {
                warn!("Claude CLI did not exit within {:?}, killing it", grace);
                self.kill().await
            }
        }
    }

    /// Get the process ID.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }
}
