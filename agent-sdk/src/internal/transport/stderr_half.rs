//! Stderr half for subprocess stderr.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::debug;

/// Stderr half for subprocess stderr.
pub struct StderrHalf<R: AsyncRead + Unpin + Send> {
    reader: BufReader<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> StderrHalf<R> {
    /// Create a new stderr half from an AsyncRead.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Consume self and forward every stderr line to the `debug` log.
    ///
    /// The CLI reports diagnostics on stderr; draining it keeps the pipe from
    /// filling up and stalling the process.
    pub fn forward_to_log(self) {
        let reader = self.reader;

        tokio::spawn(async move {
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(target: "claude_agent_sdk::cli", "{}", line);
            }
        });
    }
}
