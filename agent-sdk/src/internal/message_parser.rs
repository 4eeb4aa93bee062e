//! Message parser for Claude Code SDK responses.

use crate::types::{
    AssistantMessage, Error, Message, ProtocolMessage, Result, UserMessage,
};

/// Convert a decoded protocol message into the user-facing [`Message`].
///
/// # Errors
/// Returns `Error::MessageParse` for control traffic and unrecognized message
/// types; the query layer routes those away before they reach users.
pub fn parse_message(protocol_msg: ProtocolMessage) -> Result<Message> {
    match protocol_msg {
        ProtocolMessage::User {
            message,
            parent_tool_use_id,
            uuid,
        } => Ok(Message::User(UserMessage {
            content: message.content,
            uuid,
            parent_tool_use_id,
        })),
        ProtocolMessage::Assistant {
            message,
            parent_tool_use_id,
            error,
        } => Ok(Message::Assistant(AssistantMessage {
            content: message.content,
            model: message.model,
            parent_tool_use_id,
            error,
        })),
        ProtocolMessage::Stream(msg) => Ok(Message::Stream(msg)),
        ProtocolMessage::Result(msg) => Ok(Message::Result(msg)),
        ProtocolMessage::System(msg) => Ok(Message::System(msg)),
        ProtocolMessage::ControlRequest { .. } | ProtocolMessage::ControlResponse { .. } => Err(
            Error::MessageParse("control messages are not conversation messages".to_string()),
        ),
        ProtocolMessage::Unknown => Err(Error::MessageParse(
            "unrecognized message type".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(line: &str) -> ProtocolMessage {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_parse_assistant_keeps_error_and_parent() {
        let msg = parse_message(decode(
            r#"{"type":"assistant","message":{"model":"m","content":[]},"parent_tool_use_id":"t1","error":"rate_limit"}"#,
        ))
        .unwrap();
        match msg {
            Message::Assistant(assistant) => {
                assert_eq!(assistant.parent_tool_use_id.as_deref(), Some("t1"));
                assert_eq!(
                    assistant.error,
                    Some(crate::types::AssistantMessageError::RateLimit)
                );
            }
            other => panic!("Wrong message type: {:?}", other),
        }
    }

    #[test]
    fn test_parse_user_string_content() {
        let msg = parse_message(decode(
            r#"{"type":"user","message":{"role":"user","content":"hello"}}"#,
        ))
        .unwrap();
        assert!(matches!(msg, Message::User(_)));
    }

    #[test]
    fn test_control_messages_are_rejected() {
        let result = parse_message(decode(
            r#"{"type":"control_response","response":{"subtype":"success","request_id":"r"}}"#,
        ));
        assert!(matches!(result, Err(Error::MessageParse(_))));
        assert!(parse_message(ProtocolMessage::Unknown).is_err());
    }
}
