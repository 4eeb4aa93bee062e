//! Message types for Claude Agent SDK.

use serde::{Deserialize, Serialize};

/// Assistant message error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantMessageError {
    AuthenticationFailed,
    BillingError,
    RateLimit,
    InvalidRequest,
    ServerError,
    /// Any error code this SDK does not model.
    #[serde(other)]
    Unknown,
}

/// Content block types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Thinking {
        thinking: String,
        #[serde(default)]
        signature: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<ContentBlockContent>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
    /// Block types this SDK does not model.
    #[serde(other)]
    Unknown,
}

impl ContentBlock {
    /// The text carried by this block, if it is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Content for tool result blocks (can be string or array).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentBlockContent {
    String(String),
    Array(Vec<serde_json::Value>),
}

/// Message content (can be string or array of content blocks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    String(String),
    Blocks(Vec<ContentBlock>),
}

/// User message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMessage {
    pub content: MessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_tool_use_id: Option<String>,
}

/// Assistant message with content blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub content: Vec<ContentBlock>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_tool_use_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AssistantMessageError>,
}

impl AssistantMessage {
    /// An assistant message made of a single text block.
    pub fn text(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            model: model.into(),
            parent_tool_use_id: None,
            error: None,
        }
    }
}

/// System message with metadata.
///
/// Everything except `subtype` is kept verbatim in `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMessage {
    pub subtype: String,
    #[serde(flatten)]
    pub data: serde_json::Value,
}

/// Result message with cost and usage information.
///
/// Always the last message of a response; `subtype` is `success` or an
/// error kind such as `error_max_turns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultMessage {
    pub subtype: String,
    #[serde(default)]
    pub duration_ms: i64,
    #[serde(default)]
    pub duration_api_ms: i64,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub num_turns: i32,
    #[serde(default)]
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// Stream event for partial message updates during streaming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamEvent {
    pub uuid: String,
    pub session_id: String,
    pub event: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_tool_use_id: Option<String>,
}

/// Message types yielded to SDK users.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    User(UserMessage),
    Assistant(AssistantMessage),
    System(SystemMessage),
    Result(ResultMessage),
    #[serde(rename = "stream_event")]
    Stream(StreamEvent),
}

/// Inner `message` object of a wire-level user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub content: MessageContent,
}

/// Inner `message` object of a wire-level assistant message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantPayload {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub model: String,
}

/// A line of the CLI's stream-json output, discriminated by its `type` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProtocolMessage {
    User {
        message: UserPayload,
        #[serde(default)]
        parent_tool_use_id: Option<String>,
        #[serde(default)]
        uuid: Option<String>,
    },
    Assistant {
        message: AssistantPayload,
        #[serde(default)]
        parent_tool_use_id: Option<String>,
        #[serde(default)]
        error: Option<AssistantMessageError>,
    },
    System(SystemMessage),
    Result(ResultMessage),
    #[serde(rename = "stream_event")]
    Stream(StreamEvent),
    ControlRequest {
        request_id: String,
        request: serde_json::Value,
    },
    ControlResponse {
        response: serde_json::Value,
    },
    /// Message types this SDK does not model; skipped by the reader.
    #[serde(other)]
    Unknown,
}

/// Input message structure for sending to Claude
#[derive(Debug, Clone, Serialize)]
pub struct InputMessage {
    /// Message type (always "user")
    #[serde(rename = "type")]
    pub r#type: String,
    /// Message content
    pub message: serde_json::Value,
    /// Parent tool use ID (for tool results)
    pub parent_tool_use_id: Option<String>,
    /// Session ID
    pub session_id: String,
}

impl InputMessage {
    /// Create a new user message
    pub fn user(content: &str, session_id: &str) -> Self {
        Self {
            r#type: "user".to_string(),
            message: serde_json::json!({
                "role": "user",
                "content": content
            }),
            parent_tool_use_id: None,
            session_id: session_id.to_string(),
        }
    }
}
