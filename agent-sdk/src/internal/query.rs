//! Query class for handling the bidirectional control protocol.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::AsyncWrite;
use tokio::process::ChildStdin;
use tokio::sync::{Mutex, mpsc, oneshot};
use tracing::{debug, error, warn};

use crate::internal::transport::WriteHalf;
use crate::types::{
    ControlRequestEnvelope, ControlResponseEnvelope, ControlResponsePayload, Error,
    ProtocolMessage, Result,
};

const CONTROL_TIMEOUT: Duration = Duration::from_secs(60);

type PendingRequests = Arc<Mutex<HashMap<String, oneshot::Sender<ControlResponsePayload>>>>;
type SharedWriter<W> = Arc<Mutex<Option<WriteHalf<W>>>>;

/// Query routes CLI output and drives the control protocol.
///
/// This class manages:
/// - Control request/response routing
/// - Refusing CLI-initiated control requests (no callbacks are registered)
/// - Message streaming
/// - Initialization handshake
pub struct Query<W: AsyncWrite + Unpin + Send + 'static = ChildStdin> {
    write_half: SharedWriter<W>,
    read_rx: Option<mpsc::Receiver<Result<ProtocolMessage>>>,
    pending_requests: PendingRequests,
    request_counter: AtomicUsize,

    // Message stream
    message_tx: Option<mpsc::Sender<Result<ProtocolMessage>>>,
    message_rx: Option<mpsc::Receiver<Result<ProtocolMessage>>>,

    initialization_result: Option<serde_json::Value>,
    closed: bool,
}

impl<W: AsyncWrite + Unpin + Send + 'static> Query<W> {
    /// Create a new Query instance.
    pub fn new(
        write_half: WriteHalf<W>,
        read_rx: mpsc::Receiver<Result<ProtocolMessage>>,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::channel(100);

        Self {
            write_half: Arc::new(Mutex::new(Some(write_half))),
            read_rx: Some(read_rx),
            pending_requests: Arc::new(Mutex::new(HashMap::new())),
            request_counter: AtomicUsize::new(0),
            message_tx: Some(message_tx),
            message_rx: Some(message_rx),
            initialization_result: None,
            closed: false,
        }
    }

    /// Send the initialize handshake and remember the CLI's answer.
    pub async fn initialize(&mut self) -> Result<Option<serde_json::Value>> {
        let request = serde_json::json!({
            "subtype": "initialize",
            "hooks": null
        });

        let response = self.send_control_request(request, CONTROL_TIMEOUT).await?;
        self.initialization_result = Some(response.clone());

        Ok(Some(response))
    }

    /// Start routing messages from the transport.
    ///
    /// Control responses complete pending requests, control requests are
    /// refused, and conversation messages go to [`Query::receive_messages`]
    /// together with any decode errors.
    pub async fn start(&mut self) -> Result<()> {
        let mut read_rx = self
            .read_rx
            .take()
            .ok_or_else(|| Error::ControlProtocol("Query already started".to_string()))?;
        let message_tx = self
            .message_tx
            .take()
            .ok_or_else(|| Error::ControlProtocol("Query already started".to_string()))?;
        let write_half = Arc::clone(&self.write_half);
        let pending_requests = Arc::clone(&self.pending_requests);

        tokio::spawn(async move {
            while let Some(message) = read_rx.recv().await {
                let message = match message {
                    Ok(message) => message,
                    Err(e) => {
                        if message_tx.send(Err(e)).await.is_err() {
                            break;
                        }
                        continue;
                    }
                };
                match message {
                    ProtocolMessage::ControlResponse { response } => {
                        match serde_json::from_value::<ControlResponsePayload>(response) {
                            Ok(payload) => {
                                let mut pending = pending_requests.lock().await;
                                if let Some(tx) = pending.remove(payload.request_id()) {
                                    let _ = tx.send(payload);
                                }
                            }
                            Err(e) => warn!("Malformed control response: {}", e),
                        }
                    }
                    ProtocolMessage::ControlRequest { request_id, request } => {
                        let write_half = Arc::clone(&write_half);
                        tokio::spawn(async move {
                            if let Err(e) =
                                Self::refuse_control_request(request_id, request, write_half).await
                            {
                                error!("Failed to answer control request: {}", e);
                            }
                        });
                    }
                    ProtocolMessage::Unknown => {
                        debug!("Skipping message of unrecognized type");
                    }
                    other => {
                        if message_tx.send(Ok(other)).await.is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("Query routing finished");
        });

        Ok(())
    }

    /// Answer a CLI-initiated control request with an error.
    async fn refuse_control_request(
        request_id: String,
        request: serde_json::Value,
        write_half: SharedWriter<W>,
    ) -> Result<()> {
        let subtype = request
            .get("subtype")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        warn!("Refusing control request {} ({})", request_id, subtype);

        let response = ControlResponseEnvelope::new(ControlResponsePayload::Error {
            request_id,
            error: format!("Unsupported control request: {}", subtype),
        });
        let response_str = serde_json::to_string(&response)? + "\n";

        let mut guard = write_half.lock().await;
        match guard.as_mut() {
            Some(writer) => writer.write(&response_str).await,
            None => Ok(()),
        }
    }

    /// Send control request to CLI and wait for response.
    async fn send_control_request(
        &mut self,
        request: serde_json::Value,
        timeout: Duration,
    ) -> Result<serde_json::Value> {
        let counter = self.request_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let request_id = format!("req_{}_{}", counter, uuid::Uuid::new_v4());

        let (tx, rx) = oneshot::channel();
        self.pending_requests
            .lock()
            .await
            .insert(request_id.clone(), tx);

        let subtype = request.get("subtype").cloned();
        let envelope = ControlRequestEnvelope::new(request_id.clone(), request);
        let request_str = serde_json::to_string(&envelope)? + "\n";
        if let Err(e) = self.write(&request_str).await {
            self.pending_requests.lock().await.remove(&request_id);
            return Err(e);
        }

        let payload = match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(payload)) => payload,
            Ok(Err(_)) => {
                return Err(Error::ControlProtocol("Response channel closed".to_string()));
            }
            Err(_) => {
                self.pending_requests.lock().await.remove(&request_id);
                return Err(Error::Timeout(format!(
                    "Control request timeout: {:?}",
                    subtype
                )));
            }
        };

        match payload {
            ControlResponsePayload::Success { response, .. } => {
                Ok(response.unwrap_or_else(|| serde_json::json!({})))
            }
            ControlResponsePayload::Error { error, .. } => Err(Error::ControlProtocol(error)),
        }
    }

    /// Receive conversation messages (not control messages).
    ///
    /// The receiver can be taken once.
    pub fn receive_messages(&mut self) -> Option<mpsc::Receiver<Result<ProtocolMessage>>> {
        self.message_rx.take()
    }

    /// Write raw data to transport.
    pub async fn write(&self, data: &str) -> Result<()> {
        let mut guard = self.write_half.lock().await;
        match guard.as_mut() {
            Some(writer) => writer.write(data).await,
            None => Err(Error::CLIConnection("Input stream already closed".to_string())),
        }
    }

    /// Answer from the initialize handshake, if it completed.
    pub fn initialization_result(&self) -> Option<&serde_json::Value> {
        self.initialization_result.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Close the input stream; the CLI finishes once it sees EOF.
    pub async fn close(&mut self) -> Result<()> {
        self.closed = true;
        let writer = self.write_half.lock().await.take();
        if let Some(mut writer) = writer {
            writer.shutdown().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, BufReader, DuplexStream};

    fn query_pair() -> (
        Query<DuplexStream>,
        mpsc::Sender<Result<ProtocolMessage>>,
        tokio::io::Lines<BufReader<DuplexStream>>,
    ) {
        let (client_side, cli_side) = tokio::io::duplex(4096);
        let (read_tx, read_rx) = mpsc::channel(10);
        let query = Query::new(WriteHalf::new(client_side), read_rx);
        (query, read_tx, BufReader::new(cli_side).lines())
    }

    #[tokio::test]
    async fn test_initialize_handshake() {
        let (mut query, read_tx, mut cli_lines) = query_pair();
        query.start().await.unwrap();

        let cli = tokio::spawn(async move {
            let line = cli_lines.next_line().await.unwrap().unwrap();
            let request: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert_eq!(request["type"], "control_request");
            assert_eq!(request["request"]["subtype"], "initialize");
            let request_id = request["request_id"].as_str().unwrap().to_string();
            read_tx
                .send(Ok(ProtocolMessage::ControlResponse {
                    response: serde_json::json!({
                        "subtype": "success",
                        "request_id": request_id,
                        "response": {"commands": []}
                    }),
                }))
                .await
                .unwrap();
        });

        let result = query.initialize().await.unwrap();
        cli.await.unwrap();
        assert_eq!(result.unwrap()["commands"], serde_json::json!([]));
        assert!(query.initialization_result().is_some());
    }

    #[tokio::test]
    async fn test_conversation_messages_are_forwarded() {
        let (mut query, read_tx, _cli_lines) = query_pair();
        query.start().await.unwrap();
        let mut messages = query.receive_messages().unwrap();

        read_tx.send(Ok(ProtocolMessage::Unknown)).await.unwrap();
        read_tx
            .send(Err(Error::MessageParse("bad line".to_string())))
            .await
            .unwrap();
        read_tx
            .send(Ok(serde_json::from_str(r#"{"type":"result","subtype":"success"}"#).unwrap()))
            .await
            .unwrap();
        drop(read_tx);

        assert!(matches!(messages.recv().await, Some(Err(Error::MessageParse(_)))));
        assert!(matches!(messages.recv().await, Some(Ok(ProtocolMessage::Result(_)))));
        assert!(messages.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_control_requests_are_refused() {
        let (mut query, read_tx, mut cli_lines) = query_pair();
        query.start().await.unwrap();

        read_tx
            .send(Ok(ProtocolMessage::ControlRequest {
                request_id: "cli_1".to_string(),
                request: serde_json::json!({"subtype": "can_use_tool", "tool_name": "Bash"}),
            }))
            .await
            .unwrap();

        let line = cli_lines.next_line().await.unwrap().unwrap();
        let response: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["type"], "control_response");
        assert_eq!(response["response"]["subtype"], "error");
        assert_eq!(response["response"]["request_id"], "cli_1");
    }

    #[tokio::test]
    async fn test_write_after_close_fails() {
        let (mut query, _read_tx, _cli_lines) = query_pair();
        query.close().await.unwrap();
        assert!(query.is_closed());

        let result = query.write("{}\n").await;
        assert!(matches!(result, Err(Error::CLIConnection(_))));
    }

    #[tokio::test]
    async fn test_start_twice_fails() {
        let (mut query, _read_tx, _cli_lines) = query_pair();
        query.start().await.unwrap();
        assert!(query.start().await.is_err());
    }
}
