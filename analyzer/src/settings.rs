//! Permission settings file handed to the agent via `--settings`.
//!
//! The file grants read-only inspection of the project subtree and enables
//! the sandbox. It lives inside the project directory for exactly one
//! session; [`SettingsGuard`] removes it when the session ends, errors or is
//! cancelled.

use std::io;
use std::path::{Path, PathBuf};

use claude_agent_sdk::{
    ClaudeSettings, PermissionMode, PermissionSettings, SandboxSettings, tool_rule,
};
use tracing::{debug, warn};

use crate::config::ALLOWED_TOOLS;
use crate::error::{AnalyzerError, Result};

/// Settings file name used by [`SettingsFileName::Fixed`].
pub const SETTINGS_FILE_NAME: &str = ".claude_ai_analyzer_settings.json";

/// How the settings file is named inside the project directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettingsFileName {
    /// Always [`SETTINGS_FILE_NAME`]. Sessions on the same directory must be
    /// serialized, see [`crate::DirectoryLocks`].
    #[default]
    Fixed,
    /// A fresh `.claude_ai_analyzer_settings.<uuid>.json` per session.
    PerSession,
}

impl SettingsFileName {
    pub fn file_name(self) -> String {
        match self {
            SettingsFileName::Fixed => SETTINGS_FILE_NAME.to_string(),
            SettingsFileName::PerSession => {
                format!(".claude_ai_analyzer_settings.{}.json", uuid::Uuid::new_v4())
            }
        }
    }
}

/// Settings scoping the agent to read-only tools under the project root.
pub fn analyzer_settings() -> ClaudeSettings {
    let permissions = ALLOWED_TOOLS
        .iter()
        .fold(PermissionSettings::new(PermissionMode::AcceptEdits), |acc, tool| {
            acc.allow(tool_rule(tool, "./**"))
        });

    ClaudeSettings {
        sandbox: SandboxSettings::isolated(),
        permissions,
    }
}

/// Write the settings file into `project_dir`, replacing any existing one.
///
/// # Errors
/// Fails with [`AnalyzerError::Settings`] if the directory is not writable.
pub async fn write_settings(project_dir: &Path, naming: SettingsFileName) -> Result<SettingsGuard> {
    let path = project_dir.join(naming.file_name());
    let contents = serde_json::to_string_pretty(&analyzer_settings())?;

    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| AnalyzerError::Settings {
            path: path.clone(),
            source,
        })?;

    debug!("Wrote settings file {}", path.display());
    Ok(SettingsGuard {
        path,
        armed: true,
    })
}

/// Owns a written settings file and deletes it exactly once.
///
/// Prefer [`SettingsGuard::remove`], which reports failures. Dropping the
/// guard deletes the file synchronously and only logs failures; this is the
/// path taken when the owning future is cancelled.
#[derive(Debug)]
pub struct SettingsGuard {
    path: PathBuf,
    armed: bool,
}

impl SettingsGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file. A file that is already gone is not an error.
    pub async fn remove(mut self) -> Result<()> {
        self.armed = false;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Removed settings file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(AnalyzerError::Settings {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl Drop for SettingsGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed settings file {} on drop", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove settings file {}: {}", self.path.display(), e),
        }
    }
}
