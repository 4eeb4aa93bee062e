//! Error types for Claude Agent SDK.

use thiserror::Error;

/// Errors raised while launching or talking to the Claude Code CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// The CLI binary could not be located.
    #[error("Claude Code CLI not found: {0}")]
    CLINotFound(String),

    /// The client is not connected, or the connection dropped.
    #[error("CLI connection error: {0}")]
    CLIConnection(String),

    /// Spawning or supervising the CLI process failed.
    #[error("Process error: {0}")]
    Process(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A protocol message could not be turned into a user-facing message.
    #[error("Message parse error: {0}")]
    MessageParse(String),

    #[error("Control protocol error: {0}")]
    ControlProtocol(String),

    #[error("Timeout: {0}")]
    Timeout(String),
}

/// Result alias used throughout the SDK.
pub type Result<T> = std::result::Result<T, Error>;
