//! Command-line entry point: analyze one project directory and print the
//! agent's JSON answer to stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use claude_ai_analyzer::config::{DEFAULT_MAX_TURNS, DEFAULT_MODEL};
use claude_ai_analyzer::{AnalysisClient, AnalyzerConfig, AnalyzerError, SettingsFileName};

const DEFAULT_PROMPT: &str = "Analyze the architecture of this codebase. Return a JSON object with \
the keys \"summary\", \"components\" (array of {\"name\", \"path\", \"description\"}) and \
\"recommendations\" (array of strings).";

/// Read-only codebase analysis with the Claude Code agent
#[derive(Parser, Debug)]
#[command(name = "claude-ai-analyzer", version, about)]
struct Cli {
    /// Project directory to analyze
    project_dir: PathBuf,

    /// Output language code for human-readable values (en, ko, ja, ...)
    #[arg(long, env = "CLAUDE_ANALYZER_LANGUAGE", default_value = "en")]
    language: String,

    /// Model shorthand (haiku, sonnet, opus) or full model id
    #[arg(long, env = "CLAUDE_ANALYZER_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Analysis prompt
    #[arg(long, conflicts_with = "prompt_file")]
    prompt: Option<String>,

    /// Read the analysis prompt from a file
    #[arg(long)]
    prompt_file: Option<PathBuf>,

    /// Maximum agent turns
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// Use a unique settings file name per run instead of the shared one
    #[arg(long, env = "CLAUDE_ANALYZER_PER_SESSION_SETTINGS")]
    per_session_settings: bool,

    /// Path to the claude binary (searched on PATH when unset)
    #[arg(long, env = "CLAUDE_CLI_PATH")]
    cli_path: Option<PathBuf>,
}

impl Cli {
    fn analyzer_config(&self) -> AnalyzerConfig {
        let settings_file = if self.per_session_settings {
            SettingsFileName::PerSession
        } else {
            SettingsFileName::Fixed
        };
        let config = AnalyzerConfig::default()
            .with_model(self.model.as_str())
            .with_max_turns(self.max_turns)
            .with_settings_file(settings_file);
        match &self.cli_path {
            Some(path) => config.with_cli_path(path.as_path()),
            None => config,
        }
    }

    fn client(&self, agent_available: bool) -> Result<AnalysisClient, AnalyzerError> {
        AnalysisClient::builder(&self.project_dir, agent_available)
            .language(self.language.as_str())
            .config(self.analyzer_config())
            .build()
    }

    async fn prompt(&self) -> std::io::Result<String> {
        if let Some(path) = &self.prompt_file {
            return tokio::fs::read_to_string(path).await;
        }
        Ok(self
            .prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string()))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "claude_ai_analyzer=info,claude_agent_sdk=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let available = claude_agent_sdk::probe_cli(cli.cli_path.as_deref());
    let client = cli.client(available)?;
    let prompt = cli.prompt().await?;

    info!("Analyzing {}", client.project_dir().display());
    Ok(client.run_analysis_query(&prompt).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["claude-ai-analyzer", "/repo"]).unwrap();
        assert_eq!(cli.project_dir, PathBuf::from("/repo"));
        assert_eq!(cli.max_turns, 50);
        assert!(cli.prompt.is_none());
    }

    #[test]
    fn test_missing_cli_reported_by_builder() {
        let cli = Cli::try_parse_from(["claude-ai-analyzer", "/definitely/missing"]).unwrap();
        assert!(matches!(cli.client(false), Err(AnalyzerError::AgentUnavailable)));
    }

    #[test]
    fn test_prompt_and_prompt_file_conflict() {
        let result = Cli::try_parse_from([
            "claude-ai-analyzer",
            "/repo",
            "--prompt",
            "x",
            "--prompt-file",
            "p.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_flags() {
        let cli = Cli::try_parse_from([
            "claude-ai-analyzer",
            "/repo",
            "--model",
            "opus",
            "--max-turns",
            "7",
            "--per-session-settings",
            "--cli-path",
            "/opt/claude",
        ])
        .unwrap();
        let config = cli.analyzer_config();
        assert_eq!(config.model, "opus");
        assert_eq!(config.max_turns, 7);
        assert_eq!(config.settings_file, SettingsFileName::PerSession);
        assert_eq!(config.cli_path, Some(PathBuf::from("/opt/claude")));
    }
}
