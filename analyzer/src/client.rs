//! Analysis client bound to one project directory.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use claude_agent_sdk::{ClaudeAgentOptions, SystemPromptConfig};
use tracing::{info, warn};

use crate::agent::{AgentConnector, ClaudeCliConnector};
use crate::auth::{CredentialSource, EnvCredentials};
use crate::config::{ALLOWED_TOOLS, AnalyzerConfig};
use crate::error::{AnalyzerError, Result};
use crate::language::DEFAULT_LANGUAGE;
use crate::locks::DirectoryLocks;
use crate::model::{ModelCatalog, ModelResolver};
use crate::prompt::build_system_prompt;
use crate::session::{SessionDriver, SessionState};
use crate::settings::{SettingsFileName, write_settings};

/// Runs read-only analysis sessions against a project directory.
///
/// Construct with [`AnalysisClient::builder`]. A client holds no open
/// session between calls and can be shared across tasks.
pub struct AnalysisClient {
    project_dir: PathBuf,
    language: String,
    config: AnalyzerConfig,
    model_id: String,
    connector: Arc<dyn AgentConnector>,
    locks: DirectoryLocks,
}

impl AnalysisClient {
    /// Start building a client for `project_dir`.
    ///
    /// `agent_available` is the result of a capability probe done once at
    /// startup, typically [`claude_agent_sdk::probe_cli`].
    pub fn builder(project_dir: impl Into<PathBuf>, agent_available: bool) -> AnalysisClientBuilder {
        AnalysisClientBuilder {
            project_dir: project_dir.into(),
            agent_available,
            language: DEFAULT_LANGUAGE.to_string(),
            config: AnalyzerConfig::default(),
            credentials: None,
            models: None,
            connector: None,
            locks: None,
        }
    }

    /// Canonical project directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Concrete model identifier sent to the agent.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn system_prompt(&self) -> String {
        build_system_prompt(&self.project_dir, &self.language)
    }

    /// Session options for a run whose settings file lives at `settings_path`.
    pub fn agent_options(&self, settings_path: &Path) -> ClaudeAgentOptions {
        let mut options = ClaudeAgentOptions::new()
            .with_model(self.model_id.as_str())
            .with_system_prompt(SystemPromptConfig::Custom(self.system_prompt()))
            .with_allowed_tools(ALLOWED_TOOLS)
            .with_max_turns(self.config.max_turns)
            .with_cwd(self.project_dir.as_path())
            .with_settings(settings_path.to_string_lossy());
        if let Some(cli_path) = &self.config.cli_path {
            options = options.with_cli_path(cli_path.as_path());
        }
        options
    }

    /// Run one analysis session with `prompt` and return the concatenated
    /// assistant text.
    ///
    /// The settings file is written before the session opens and removed
    /// afterwards on success, failure and cancellation. An agent error takes
    /// precedence over a failure to remove the file.
    pub async fn run_analysis_query(&self, prompt: &str) -> Result<String> {
        let _dir_guard = match self.config.settings_file {
            SettingsFileName::Fixed => Some(self.locks.acquire(&self.project_dir).await),
            SettingsFileName::PerSession => None,
        };

        info!(
            project = %self.project_dir.display(),
            model = %self.model_id,
            language = %self.language,
            "Starting analysis"
        );

        let mut driver = SessionDriver::new();
        let settings = write_settings(&self.project_dir, self.config.settings_file).await?;
        driver.advance(SessionState::DescriptorWritten)?;

        let options = self.agent_options(settings.path());
        let outcome = driver.run(self.connector.as_ref(), options, prompt).await;
        let cleanup = settings.remove().await;

        match (outcome, cleanup) {
            (Ok(text), Ok(())) => {
                info!(chars = text.len(), "Analysis complete");
                Ok(text)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), cleanup) => {
                if let Err(cleanup_err) = cleanup {
                    warn!("Settings cleanup failed after analysis error: {}", cleanup_err);
                }
                Err(e)
            }
        }
    }
}

/// Builder for [`AnalysisClient`].
pub struct AnalysisClientBuilder {
    project_dir: PathBuf,
    agent_available: bool,
    language: String,
    config: AnalyzerConfig,
    credentials: Option<Box<dyn CredentialSource>>,
    models: Option<Box<dyn ModelResolver>>,
    connector: Option<Arc<dyn AgentConnector>>,
    locks: Option<DirectoryLocks>,
}

impl AnalysisClientBuilder {
    /// Output language code, `"en"` by default.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Credential check; [`EnvCredentials`] by default.
    pub fn credentials(mut self, credentials: impl CredentialSource + 'static) -> Self {
        self.credentials = Some(Box::new(credentials));
        self
    }

    /// Model shorthand resolution; [`ModelCatalog::from_env`] by default.
    pub fn models(mut self, models: impl ModelResolver + 'static) -> Self {
        self.models = Some(Box::new(models));
        self
    }

    /// Session factory; [`ClaudeCliConnector`] by default.
    pub fn connector(mut self, connector: impl AgentConnector + 'static) -> Self {
        self.connector = Some(Arc::new(connector));
        self
    }

    /// Lock registry for fixed settings file names; the process-wide one by default.
    pub fn locks(mut self, locks: DirectoryLocks) -> Self {
        self.locks = Some(locks);
        self
    }

    /// Validate preconditions and build the client.
    ///
    /// # Errors
    /// In order: [`AnalyzerError::AgentUnavailable`],
    /// [`AnalyzerError::MissingCredential`], then
    /// [`AnalyzerError::ProjectDir`] if the directory cannot be resolved.
    pub fn build(self) -> Result<AnalysisClient> {
        if !self.agent_available {
            return Err(AnalyzerError::AgentUnavailable);
        }

        match &self.credentials {
            Some(credentials) => credentials.require_token()?,
            None => EnvCredentials::new().require_token()?,
        }

        let project_dir = canonical_dir(&self.project_dir)?;
        let model_id = match &self.models {
            Some(models) => models.resolve(&self.config.model),
            None => ModelCatalog::from_env().resolve(&self.config.model),
        };

        Ok(AnalysisClient {
            project_dir,
            language: self.language,
            config: self.config,
            model_id,
            connector: self
                .connector
                .unwrap_or_else(|| Arc::new(ClaudeCliConnector)),
            locks: self.locks.unwrap_or_else(DirectoryLocks::global),
        })
    }
}

fn canonical_dir(path: &Path) -> Result<PathBuf> {
    let canonical = std::fs::canonicalize(path).map_err(|source| AnalyzerError::ProjectDir {
        path: path.to_path_buf(),
        source,
    })?;
    if !canonical.is_dir() {
        return Err(AnalyzerError::ProjectDir {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        });
    }
    Ok(canonical)
}
