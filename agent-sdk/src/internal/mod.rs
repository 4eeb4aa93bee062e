//! Internal implementation details for Claude Agent SDK.

pub mod message_parser;
pub mod query;
pub mod transport;

pub use message_parser::parse_message;
pub use query::Query;
