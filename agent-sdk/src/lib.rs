//! Claude Agent SDK - Rust implementation
//!
//! A thin client for the Claude Code CLI. It launches the CLI as a subprocess,
//! speaks its stream-json protocol over stdio and decodes the replies into
//! strongly-typed messages.
//!
//! # Features
//!
//! - **Type-safe**: Messages are decoded by their `type` discriminator, never guessed
//! - **Async support**: Built on tokio for async operations
//! - **Settings files**: Serializable sandbox and permission settings for `--settings`
//!
//! # Example
//!
//! ```rust
//! use claude_agent_sdk::{ClaudeAgentOptions, PermissionMode};
//!
//! let options = ClaudeAgentOptions::new()
//!     .with_model("claude-sonnet-4-5-20250929")
//!     .with_max_turns(10)
//!     .with_permission_mode(PermissionMode::Plan);
//! ```
//!
//! # Modules
//!
//! - [`types`] - All type definitions (options, messages, settings, errors)
//! - [`internal`] - Internal implementation (transport, query, parser)
//! - [`client`] - High-level client API

pub mod client;
pub mod internal;
pub mod types;

// Re-export all public types at the crate root for convenience
pub use client::ClaudeClient;
pub use internal::transport::probe_cli;
pub use types::*;
