//! Write half for subprocess stdin.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::types::Result;

/// Write half for subprocess stdin.
pub struct WriteHalf<W: AsyncWrite + Unpin + Send> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> WriteHalf<W> {
    /// Create a new write half from an AsyncWrite.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write data to stdin.
    ///
    /// This method automatically flushes after writing.
    pub async fn write(&mut self, data: &str) -> Result<()> {
        self.writer.write_all(data.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Flush and close the stream, signalling EOF to the reader.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
