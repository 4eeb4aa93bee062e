//! Analyzer configuration.

use std::path::PathBuf;

use crate::settings::SettingsFileName;

/// Model shorthand used when none is configured.
pub const DEFAULT_MODEL: &str = "sonnet";

/// Turn budget for a single analysis session.
pub const DEFAULT_MAX_TURNS: u32 = 50;

/// Read-only inspection tools the agent may use.
pub const ALLOWED_TOOLS: [&str; 3] = ["Read", "Glob", "Grep"];

/// Tunables for an [`crate::AnalysisClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Model shorthand (`haiku`, `sonnet`, `opus`) or a full model id.
    pub model: String,
    pub max_turns: u32,
    pub settings_file: SettingsFileName,
    /// Explicit CLI binary; located on `PATH` when unset.
    pub cli_path: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_turns: DEFAULT_MAX_TURNS,
            settings_file: SettingsFileName::default(),
            cli_path: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_settings_file(mut self, settings_file: SettingsFileName) -> Self {
        self.settings_file = settings_file;
        self
    }

    pub fn with_cli_path(mut self, cli_path: impl Into<PathBuf>) -> Self {
        self.cli_path = Some(cli_path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.model, "sonnet");
        assert_eq!(config.max_turns, 50);
        assert_eq!(config.settings_file, SettingsFileName::Fixed);
        assert!(config.cli_path.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = AnalyzerConfig::default()
            .with_model("opus")
            .with_max_turns(10)
            .with_settings_file(SettingsFileName::PerSession)
            .with_cli_path("/usr/local/bin/claude");
        assert_eq!(config.model, "opus");
        assert_eq!(config.max_turns, 10);
        assert_eq!(config.settings_file, SettingsFileName::PerSession);
        assert_eq!(config.cli_path, Some(PathBuf::from("/usr/local/bin/claude")));
    }
}
