//! Agent configuration options.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::types::PermissionMode;

/// System prompt configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemPromptConfig {
    /// Replace the CLI's system prompt entirely.
    Custom(String),
    /// Keep the CLI's default prompt and append this text.
    Append(String),
}

/// Options used to launch and configure a Claude Code session.
#[derive(Debug, Clone, Default)]
pub struct ClaudeAgentOptions {
    /// Concrete model identifier passed to `--model`.
    pub model: Option<String>,
    pub system_prompt: Option<SystemPromptConfig>,
    /// Tools the agent may call without prompting.
    pub allowed_tools: Vec<String>,
    /// Upper bound on agent turns; the CLI stops the session once exceeded.
    pub max_turns: Option<u32>,
    pub permission_mode: Option<PermissionMode>,
    /// Working directory of the CLI process.
    pub cwd: Option<PathBuf>,
    /// Path to a settings file (or inline settings JSON) for `--settings`.
    pub settings: Option<String>,
    /// Explicit CLI binary; located on `PATH` when unset.
    pub cli_path: Option<PathBuf>,
    pub env: HashMap<String, String>,
}

impl ClaudeAgentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: SystemPromptConfig) -> Self {
        self.system_prompt = Some(system_prompt);
        self
    }

    pub fn with_allowed_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    pub fn with_permission_mode(mut self, mode: PermissionMode) -> Self {
        self.permission_mode = Some(mode);
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_settings(mut self, settings: impl Into<String>) -> Self {
        self.settings = Some(settings.into());
        self
    }

    pub fn with_cli_path(mut self, cli_path: impl Into<PathBuf>) -> Self {
        self.cli_path = Some(cli_path.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let options = ClaudeAgentOptions::new()
            .with_model("claude-sonnet-4-5-20250929")
            .with_allowed_tools(["Read", "Glob"])
            .with_max_turns(50)
            .with_cwd("/repo")
            .with_env("FOO", "bar");

        assert_eq!(options.model.as_deref(), Some("claude-sonnet-4-5-20250929"));
        assert_eq!(options.allowed_tools, vec!["Read", "Glob"]);
        assert_eq!(options.max_turns, Some(50));
        assert_eq!(options.cwd, Some(PathBuf::from("/repo")));
        assert_eq!(options.env.get("FOO").map(String::as_str), Some("bar"));
        assert!(options.system_prompt.is_none());
    }
}
