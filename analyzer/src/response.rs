//! Response text accumulation.

use claude_agent_sdk::Message;
use tracing::{debug, warn};

/// Collects assistant text in arrival order.
///
/// Only text blocks of assistant messages contribute; tool use, thinking,
/// user, system and result messages are ignored.
#[derive(Debug, Default)]
pub struct ResponseAccumulator {
    text: String,
    assistant_messages: usize,
}

impl ResponseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: &Message) {
        match message {
            Message::Assistant(assistant) => {
                self.assistant_messages += 1;
                for text in assistant.content.iter().filter_map(|block| block.as_text()) {
                    self.text.push_str(text);
                }
            }
            Message::Result(result) if result.is_error => {
                // e.g. error_max_turns; the agent already stopped, nothing to retry.
                warn!(
                    subtype = %result.subtype,
                    num_turns = result.num_turns,
                    "Agent session ended with an error result"
                );
            }
            Message::Result(result) => {
                debug!(num_turns = result.num_turns, cost_usd = ?result.total_cost_usd, "Agent session finished");
            }
            _ => {}
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn assistant_messages(&self) -> usize {
        self.assistant_messages
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
