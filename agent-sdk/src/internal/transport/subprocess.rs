//! Subprocess transport implementation using Claude Code CLI.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tracing::{debug, info};

use super::{ProcessHandle, ReadHalf, StderrHalf, WriteHalf};
use crate::types::{ClaudeAgentOptions, Error, Result, SystemPromptConfig};

/// Type alias for the split subprocess components
type SplitSubprocess = (
    ReadHalf<ChildStdout>,
    WriteHalf<ChildStdin>,
    StderrHalf<ChildStderr>,
    ProcessHandle,
);

/// Subprocess transport using Claude Code CLI.
///
/// The CLI always runs in streaming mode: prompts are written to stdin as
/// stream-json and replies are read from stdout the same way.
pub struct SubprocessCLITransport {
    options: ClaudeAgentOptions,
    cli_path: PathBuf,
    process: Option<Child>,
}

/// Report whether the Claude Code CLI can be located.
///
/// With an explicit path only that file is checked; otherwise `PATH` and the
/// usual install locations are searched.
pub fn probe_cli(cli_path: Option<&Path>) -> bool {
    match cli_path {
        Some(path) => path.is_file(),
        None => SubprocessCLITransport::find_cli().is_ok(),
    }
}

impl SubprocessCLITransport {
    /// Create a new subprocess transport.
    pub fn new(options: ClaudeAgentOptions) -> Result<Self> {
        let cli_path = if let Some(ref path) = options.cli_path {
            path.clone()
        } else {
            Self::find_cli()?
        };

        Ok(Self {
            options,
            cli_path,
            process: None,
        })
    }

    /// Find Claude Code CLI binary.
    fn find_cli() -> Result<PathBuf> {
        if let Ok(path) = which::which("claude") {
            return Ok(path);
        }

        let home = std::env::var("HOME").unwrap_or_else(|_| String::from("/"));
        let locations = [
            PathBuf::from(&home).join(".npm-global/bin/claude"),
            PathBuf::from("/usr/local/bin/claude"),
            PathBuf::from(&home).join(".local/bin/claude"),
            PathBuf::from(&home).join("node_modules/.bin/claude"),
            PathBuf::from(&home).join(".yarn/bin/claude"),
            PathBuf::from(&home).join(".claude/local/claude"),
        ];

        for path in locations {
            if path.is_file() {
                return Ok(path);
            }
        }

        Err(Error::CLINotFound(
            "Claude Code not found. Install with:\n  npm install -g @anthropic-ai/claude-code\n\
            \nOr provide the path via ClaudeAgentOptions::with_cli_path(\"/path/to/claude\")"
                .to_string(),
        ))
    }

    /// Build CLI command with arguments.
    fn build_command(&self) -> Vec<String> {
        let mut cmd = vec![
            self.cli_path.to_string_lossy().to_string(),
            "--output-format".to_string(),
            "stream-json".to_string(),
            "--verbose".to_string(),
        ];

        match &self.options.system_prompt {
            Some(SystemPromptConfig::Custom(content)) => {
                cmd.push("--system-prompt".to_string());
                cmd.push(content.clone());
            }
            Some(SystemPromptConfig::Append(text)) => {
                cmd.push("--append-system-prompt".to_string());
                cmd.push(text.clone());
            }
            None => {
                cmd.push("--system-prompt".to_string());
                cmd.push(String::new());
            }
        }

        if !self.options.allowed_tools.is_empty() {
            cmd.push("--allowedTools".to_string());
            cmd.push(self.options.allowed_tools.join(","));
        }

        if let Some(max_turns) = self.options.max_turns {
            cmd.push("--max-turns".to_string());
            cmd.push(max_turns.to_string());
        }

        if let Some(ref model) = self.options.model {
            cmd.push("--model".to_string());
            cmd.push(model.clone());
        }

        if let Some(mode) = self.options.permission_mode {
            cmd.push("--permission-mode".to_string());
            cmd.push(mode.as_str().to_string());
        }

        if let Some(ref settings) = self.options.settings {
            cmd.push("--settings".to_string());
            cmd.push(settings.clone());
        }

        cmd.push("--input-format".to_string());
        cmd.push("stream-json".to_string());

        cmd
    }

    /// Split the transport into independent read/write/stderr halves and process handle.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The process has not been started (call `connect()` first)
    /// - stdin, stdout, or stderr are not available
    pub fn split(mut self) -> Result<SplitSubprocess> {
        let mut child = self.process.take().ok_or_else(|| {
            Error::Process("Process not started. Call connect() first.".to_string())
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Process("stdin not available".to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Process("stdout not available".to_string()))?;

        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Process("stderr not available".to_string()))?;

        Ok((
            ReadHalf::new(stdout),
            WriteHalf::new(stdin),
            StderrHalf::new(stderr),
            ProcessHandle::new(child),
        ))
    }

    /// Start the Claude CLI process with piped stdio.
    ///
    /// The child is killed if its handle is dropped, so an abandoned session
    /// never outlives its caller.
    pub async fn connect(&mut self) -> Result<()> {
        if self.process.is_some() {
            return Ok(());
        }

        let cmd_args = self.build_command();
        debug!("Starting Claude CLI: {:?}", cmd_args);

        let mut command = Command::new(&cmd_args[0]);
        command
            .args(&cmd_args[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref cwd) = self.options.cwd {
            command.current_dir(cwd);
        }

        for (key, value) in &self.options.env {
            command.env(key, value);
        }
        command.env("CLAUDE_CODE_ENTRYPOINT", "sdk-rust");

        let child = command
            .spawn()
            .map_err(|e| Error::Process(format!("Failed to spawn Claude CLI: {}", e)))?;

        info!(pid = ?child.id(), "Claude CLI process started");
        self.process = Some(child);
        Ok(())
    }

    /// Check if the process has been started.
    pub fn is_ready(&self) -> bool {
        self.process.is_some()
    }
}
