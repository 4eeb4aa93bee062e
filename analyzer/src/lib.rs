//! Read-only codebase analysis driven by the Claude Code agent.
//!
//! An [`AnalysisClient`] is bound to a project directory and an output
//! language. Each call to [`AnalysisClient::run_analysis_query`] writes a
//! settings file that limits the agent to reading, listing and searching the
//! project, opens one agent session, submits the prompt and returns the
//! concatenated assistant text. The settings file is removed on every exit
//! path, including cancellation.
//!
//! ```rust,no_run
//! use claude_ai_analyzer::AnalysisClient;
//!
//! # async fn example() -> Result<(), claude_ai_analyzer::AnalyzerError> {
//! let available = claude_agent_sdk::probe_cli(None);
//! let client = AnalysisClient::builder("/path/to/repo", available)
//!     .language("ko")
//!     .build()?;
//! let json = client.run_analysis_query("Summarize the architecture.").await?;
//! println!("{}", json);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod language;
pub mod locks;
pub mod model;
pub mod prompt;
pub mod response;
pub mod session;
pub mod settings;

pub use agent::{AgentConnector, AgentSession, ClaudeCliConnector};
pub use auth::{CredentialSource, EnvCredentials};
pub use client::{AnalysisClient, AnalysisClientBuilder};
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
pub use locks::{DirectoryGuard, DirectoryLocks};
pub use model::{ModelCatalog, ModelResolver};
pub use response::ResponseAccumulator;
pub use session::{SessionDriver, SessionState};
pub use settings::{SettingsFileName, SettingsGuard};
