//! Read half for subprocess stdout.
//!
//! This module provides a wrapper for reading JSON messages from the subprocess stdout.
//! It spawns a background task that continuously reads and decodes JSON lines.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::types::{Error, ProtocolMessage, Result};

/// Read half for subprocess stdout.
///
/// Decodes each stdout line as a [`ProtocolMessage`] using its `type`
/// discriminator. Lines that are not JSON, or not a JSON object with a
/// `type`, are logged and dropped. A typed object that fails to decode is
/// passed on as an error so the conversation cannot silently lose a message.
pub struct ReadHalf<R: AsyncRead + Unpin + Send> {
    reader: BufReader<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> ReadHalf<R> {
    /// Create a new read half from an AsyncRead.
    ///
    /// # Arguments
    ///
    /// * `reader` - An async reader (typically stdout from a subprocess)
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Consume self and return a channel that yields decoded protocol messages.
    ///
    /// The background task runs until EOF is reached or the receiver is
    /// dropped. The channel has a buffer size of 100 messages.
    pub fn read_messages(self) -> mpsc::Receiver<Result<ProtocolMessage>> {
        let (tx, rx) = mpsc::channel(100);
        let reader = self.reader;

        tokio::spawn(async move {
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim().is_empty() {
                    continue;
                }
                trace!("[stdout] {}", line);
                let item = match serde_json::from_str::<ProtocolMessage>(&line) {
                    Ok(msg) => Ok(msg),
                    Err(e) if has_type_tag(&line) => {
                        warn!("Malformed CLI message: {} - line: {}", e, line);
                        Err(Error::Json(e))
                    }
                    Err(e) => {
                        warn!("Failed to decode CLI output: {} - line: {}", e, line);
                        continue;
                    }
                };
                if tx.send(item).await.is_err() {
                    break;
                }
            }
            debug!("[stdout] Stream ended");
        });

        rx
    }
}

fn has_type_tag(line: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(line)
        .is_ok_and(|value| value.get("type").is_some_and(|t| t.is_string()))
}
