//! Seam between the session driver and the agent client.

use async_trait::async_trait;
use claude_agent_sdk::{ClaudeAgentOptions, ClaudeClient, Message, Result};
use futures::stream::BoxStream;
use tracing::debug;

/// An open agent session.
#[async_trait]
pub trait AgentSession: Send {
    /// Submit one prompt.
    async fn query(&mut self, prompt: &str) -> Result<()>;

    /// Stream the reply to the last prompt, ending after its result message.
    async fn receive_response(&mut self) -> Result<BoxStream<'_, Result<Message>>>;

    /// Release the session.
    async fn close(&mut self) -> Result<()>;
}

/// Opens agent sessions.
#[async_trait]
pub trait AgentConnector: Send + Sync {
    async fn connect(&self, options: ClaudeAgentOptions) -> Result<Box<dyn AgentSession>>;
}

/// Connector backed by the Claude Code CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeCliConnector;

#[async_trait]
impl AgentConnector for ClaudeCliConnector {
    async fn connect(&self, options: ClaudeAgentOptions) -> Result<Box<dyn AgentSession>> {
        let mut client = ClaudeClient::new(options);
        client.connect().await?;
        debug!("Claude CLI session open");
        Ok(Box::new(client))
    }
}

#[async_trait]
impl AgentSession for ClaudeClient {
    async fn query(&mut self, prompt: &str) -> Result<()> {
        self.query_string(prompt, None).await
    }

    async fn receive_response(&mut self) -> Result<BoxStream<'_, Result<Message>>> {
        ClaudeClient::receive_response(self).await
    }

    async fn close(&mut self) -> Result<()> {
        self.disconnect().await
    }
}
