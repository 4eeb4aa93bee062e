//! SDK control protocol envelopes.
//!
//! Control messages share stdio with conversation messages and are told
//! apart by their `type` field.

use serde::{Deserialize, Serialize};

/// Outgoing control request.
#[derive(Debug, Clone, Serialize)]
pub struct ControlRequestEnvelope {
    #[serde(rename = "type")]
    pub type_: &'static str,
    pub request_id: String,
    pub request: serde_json::Value,
}

impl ControlRequestEnvelope {
    pub fn new(request_id: impl Into<String>, request: serde_json::Value) -> Self {
        Self {
            type_: "control_request",
            request_id: request_id.into(),
            request,
        }
    }
}

/// Body of a control response, discriminated by `subtype`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subtype", rename_all = "snake_case")]
pub enum ControlResponsePayload {
    Success {
        request_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        response: Option<serde_json::Value>,
    },
    Error {
        request_id: String,
        error: String,
    },
}

impl ControlResponsePayload {
    pub fn request_id(&self) -> &str {
        match self {
            ControlResponsePayload::Success { request_id, .. }
            | ControlResponsePayload::Error { request_id, .. } => request_id,
        }
    }
}

/// Control response in either direction.
#[derive(Debug, Clone, Serialize)]
pub struct ControlResponseEnvelope {
    #[serde(rename = "type")]
    pub type_: &'static str,
    pub response: ControlResponsePayload,
}

impl ControlResponseEnvelope {
    pub fn new(response: ControlResponsePayload) -> Self {
        Self {
            type_: "control_response",
            response,
        }
    }
}
