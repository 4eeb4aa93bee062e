//! Claude SDK Client for interacting with Claude Code.

use std::pin::Pin;
use std::time::Duration;

use async_stream::stream;
use futures::Stream;
use tracing::{debug, warn};

use crate::internal::Query;
use crate::internal::transport::{ProcessHandle, SubprocessCLITransport};
use crate::types::{ClaudeAgentOptions, Error, InputMessage, Message, Result};

/// How long `disconnect` waits for the CLI to exit after stdin closes.
const EXIT_GRACE: Duration = Duration::from_secs(5);

/// Client for conversations with Claude Code.
///
/// A client owns one CLI process. `connect` spawns it and performs the
/// initialize handshake, `query_string` submits a prompt, `receive_response`
/// streams the reply, and `disconnect` closes stdin and reaps the process.
///
/// # Example
///
/// ```rust,no_run
/// use claude_agent_sdk::{ClaudeClient, ClaudeAgentOptions, Message};
/// use futures::StreamExt;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = ClaudeClient::new(ClaudeAgentOptions::new());
///     client.connect().await?;
///     client.query_string("What is the capital of France?", None).await?;
///
///     {
///         let mut response = client.receive_response().await?;
///         while let Some(message) = response.next().await {
///             if let Message::Assistant(msg) = message? {
///                 println!("{:?}", msg.content);
///             }
///         }
///     }
///
///     client.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct ClaudeClient {
    options: ClaudeAgentOptions,
    query: Option<Query>,
    process_handle: Option<ProcessHandle>,
}

impl ClaudeClient {
    /// Create a new Claude SDK client.
    pub fn new(options: ClaudeAgentOptions) -> Self {
        Self {
            options,
            query: None,
            process_handle: None,
        }
    }

    /// Options this client was created with.
    pub fn options(&self) -> &ClaudeAgentOptions {
        &self.options
    }

    pub fn is_connected(&self) -> bool {
        self.query.is_some()
    }

    /// Spawn the CLI and complete the initialize handshake.
    ///
    /// # Errors
    /// Returns an error if the CLI cannot be found or spawned, or if the
    /// handshake fails.
    pub async fn connect(&mut self) -> Result<()> {
        if self.query.is_some() {
            return Ok(());
        }

        let mut transport = SubprocessCLITransport::new(self.options.clone())?;
        transport.connect().await?;

        let (read_half, write_half, stderr_half, process_handle) = transport.split()?;
        let read_rx = read_half.read_messages();
        stderr_half.forward_to_log();

        // Keep the handle before the handshake so a failed handshake still
        // reaps the process on drop.
        self.process_handle = Some(process_handle);

        let mut query = Query::new(write_half, read_rx);
        query.start().await?;
        query.initialize().await?;

        self.query = Some(query);
        Ok(())
    }

    /// Send a new request with a string prompt.
    ///
    /// # Errors
    /// Returns an error if not connected or write fails
    pub async fn query_string(&mut self, prompt: &str, session_id: Option<&str>) -> Result<()> {
        let query = self.query.as_ref().ok_or_else(|| {
            Error::CLIConnection("Not connected. Call connect() first.".to_string())
        })?;

        let message = InputMessage::user(prompt, session_id.unwrap_or("default"));
        let message_str = serde_json::to_string(&message)? + "\n";
        query.write(&message_str).await
    }

    /// Receive messages until and including a ResultMessage.
    ///
    /// The stream can be taken once per connection. If the CLI stops before
    /// sending a result, the stream ends with an error.
    ///
    /// # Errors
    /// Returns an error if not connected or the stream was already taken
    pub async fn receive_response(
        &mut self,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<Message>> + Send + '_>>> {
        let query = self.query.as_mut().ok_or_else(|| {
            Error::CLIConnection("Not connected. Call connect() first.".to_string())
        })?;

        let mut message_rx = query.receive_messages().ok_or_else(|| {
            Error::CLIConnection("Response stream already taken".to_string())
        })?;

        let response_stream = stream! {
            let mut finished = false;
            while let Some(data) = message_rx.recv().await {
                match data.and_then(crate::internal::parse_message) {
                    Ok(message) => {
                        let is_result = matches!(message, Message::Result(_));
                        yield Ok(message);
                        if is_result {
                            finished = true;
                            break;
                        }
                    }
                    Err(e) => {
                        yield Err(e);
                        finished = true;
                        break;
                    }
                }
            }
            if !finished {
                yield Err(Error::CLIConnection(
                    "Claude CLI closed its output before sending a result".to_string(),
                ));
            }
        };

        Ok(Box::pin(response_stream))
    }

    /// Close stdin, wait briefly for the CLI to exit, then kill it.
    ///
    /// # Errors
    /// Returns an error if cleanup fails
    pub async fn disconnect(&mut self) -> Result<()> {
        if let Some(mut query) = self.query.take() {
            query.close().await?;
        }
        if let Some(mut handle) = self.process_handle.take() {
            debug!(pid = ?handle.id(), "Waiting for Claude CLI to exit");
            handle.shutdown(EXIT_GRACE).await?;
        }
        Ok(())
    }
}

impl Drop for ClaudeClient {
    fn drop(&mut self) {
        // The process is killed on drop; only the graceful close is skipped.
        if self.query.is_some() {
            warn!("ClaudeClient dropped without calling disconnect()");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ClaudeAgentOptions {
        ClaudeAgentOptions::new().with_cli_path("/definitely/not/here/claude")
    }

    #[test]
    fn test_client_creation() {
        let client = ClaudeClient::new(options());
        assert!(!client.is_connected());
        assert_eq!(client.options().max_turns, None);
    }

    #[tokio::test]
    async fn test_connect_fails_without_cli() {
        let mut client = ClaudeClient::new(options());
        let result = client.connect().await;
        assert!(matches!(result, Err(Error::Process(_))));
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_query_requires_connection() {
        let mut client = ClaudeClient::new(options());
        let result = client.query_string("hello", None).await;
        assert!(matches!(result, Err(Error::CLIConnection(_))));
        assert!(client.receive_response().await.is_err());
    }

    #[tokio::test]
    async fn test_disconnect_when_not_connected() {
        let mut client = ClaudeClient::new(options());
        client.disconnect().await.unwrap();
        assert!(!client.is_connected());
    }
}
