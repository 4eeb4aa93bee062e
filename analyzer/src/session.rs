//! Session driver state machine.
//!
//! ```text
//! Uninitialized -> DescriptorWritten -> ClientOpen -> Querying -> Collecting -> Closed
//! ```
//!
//! `Closed` is terminal and reachable from every other state, so a failure at
//! any step still ends in a closed session.

use std::fmt;

use claude_agent_sdk::ClaudeAgentOptions;
use futures::StreamExt;
use tracing::{debug, warn};

use crate::agent::{AgentConnector, AgentSession};
use crate::error::{AnalyzerError, Result};
use crate::response::ResponseAccumulator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    DescriptorWritten,
    ClientOpen,
    Querying,
    Collecting,
    Closed,
}

impl SessionState {
    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Uninitialized, DescriptorWritten)
                | (DescriptorWritten, ClientOpen)
                | (ClientOpen, Querying)
                | (Querying, Collecting)
        ) || (next == Closed && self != Closed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::DescriptorWritten => "descriptor-written",
            SessionState::ClientOpen => "client-open",
            SessionState::Querying => "querying",
            SessionState::Collecting => "collecting",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Drives one agent session through its states.
#[derive(Debug)]
pub struct SessionDriver {
    state: SessionState,
}

impl Default for SessionDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionDriver {
    pub fn new() -> Self {
        Self {
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Move to `next`, rejecting transitions the state machine does not allow.
    pub fn advance(&mut self, next: SessionState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(AnalyzerError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        debug!("Session {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Open a session, submit `prompt` and collect the reply text.
    ///
    /// Must be called in `DescriptorWritten`. The session is closed on every
    /// path; the first error wins and is returned unchanged. On return the
    /// driver is `Closed`.
    pub async fn run(
        &mut self,
        connector: &dyn AgentConnector,
        options: ClaudeAgentOptions,
        prompt: &str,
    ) -> Result<String> {
        let outcome = self.open_and_converse(connector, options, prompt).await;
        if self.state != SessionState::Closed {
            self.advance(SessionState::Closed)?;
        }
        outcome
    }

    async fn open_and_converse(
        &mut self,
        connector: &dyn AgentConnector,
        options: ClaudeAgentOptions,
        prompt: &str,
    ) -> Result<String> {
        if self.state != SessionState::DescriptorWritten {
            return Err(AnalyzerError::InvalidTransition {
                from: self.state,
                to: SessionState::ClientOpen,
            });
        }

        let mut session = connector.connect(options).await?;
        self.advance(SessionState::ClientOpen)?;

        let outcome = self.converse(session.as_mut(), prompt).await;
        let closed = session.close().await;

        match (outcome, closed) {
            (Ok(text), Ok(())) => Ok(text),
            (Ok(_), Err(e)) => Err(e.into()),
            (Err(e), closed) => {
                if let Err(close_err) = closed {
                    warn!("Closing agent session after failure also failed: {}", close_err);
                }
                Err(e)
            }
        }
    }

    async fn converse(&mut self, session: &mut dyn AgentSession, prompt: &str) -> Result<String> {
        self.advance(SessionState::Querying)?;
        session.query(prompt).await?;

        let mut stream = session.receive_response().await?;
        self.advance(SessionState::Collecting)?;

        let mut accumulator = ResponseAccumulator::new();
        while let Some(message) = stream.next().await {
            accumulator.push(&message?);
        }

        debug!(
            assistant_messages = accumulator.assistant_messages(),
            chars = accumulator.text().len(),
            "Response collected"
        );
        Ok(accumulator.into_text())
    }
}
