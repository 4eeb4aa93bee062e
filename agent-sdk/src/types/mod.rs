//! Type definitions for Claude Agent SDK.

pub mod agent;
pub mod control;
pub mod error;
pub mod messages;
pub mod permissions;
pub mod sandbox;
pub mod settings;

// Re-export commonly used types
pub use agent::{ClaudeAgentOptions, SystemPromptConfig};
pub use control::{ControlRequestEnvelope, ControlResponseEnvelope, ControlResponsePayload};
pub use error::{Error, Result};
pub use messages::{
    AssistantMessage, AssistantMessageError, AssistantPayload, ContentBlock, ContentBlockContent,
    InputMessage, Message, MessageContent, ProtocolMessage, ResultMessage, StreamEvent,
    SystemMessage, UserMessage, UserPayload,
};
pub use permissions::{PermissionMode, PermissionSettings, tool_rule};
pub use sandbox::SandboxSettings;
pub use settings::ClaudeSettings;
