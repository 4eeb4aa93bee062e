//! Error types for the analyzer.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::SessionState;

/// Errors surfaced by [`crate::AnalysisClient`]. None are retried locally.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The Claude Code CLI was not found when the process started.
    #[error(
        "Claude Code CLI is not available. Install it with: npm install -g @anthropic-ai/claude-code"
    )]
    AgentUnavailable,

    #[error(
        "No authentication token found. Run `claude setup-token` and export CLAUDE_CODE_OAUTH_TOKEN, or set ANTHROPIC_API_KEY"
    )]
    MissingCredential,

    #[error("Project directory {path} is not usable: {source}")]
    ProjectDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or deleting the permission settings file failed.
    #[error("Settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failure while opening, querying or streaming the agent session.
    #[error(transparent)]
    Agent(#[from] claude_agent_sdk::Error),

    #[error("Invalid session transition from {from} to {to}")]
    InvalidTransition { from: SessionState, to: SessionState },
}

/// Result alias used throughout the analyzer.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
