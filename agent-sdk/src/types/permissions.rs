//! Permission types for Claude Agent SDK.

use serde::{Deserialize, Serialize};

/// Permission mode applied to tool calls the CLI would otherwise prompt for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionMode {
    Default,
    AcceptEdits,
    Plan,
    BypassPermissions,
}

impl PermissionMode {
    /// The flag value understood by `--permission-mode`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionMode::Default => "default",
            PermissionMode::AcceptEdits => "acceptEdits",
            PermissionMode::Plan => "plan",
            PermissionMode::BypassPermissions => "bypassPermissions",
        }
    }
}

/// The `permissions` section of a Claude settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSettings {
    pub default_mode: PermissionMode,
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny: Vec<String>,
}

impl PermissionSettings {
    pub fn new(default_mode: PermissionMode) -> Self {
        Self {
            default_mode,
            allow: Vec::new(),
            deny: Vec::new(),
        }
    }

    /// Allow a permission rule such as `Read(./**)`.
    pub fn allow(mut self, rule: impl Into<String>) -> Self {
        self.allow.push(rule.into());
        self
    }
}

/// Format a tool permission rule, e.g. `tool_rule("Grep", "./**")` gives `Grep(./**)`.
pub fn tool_rule(tool: &str, pattern: &str) -> String {
    format!("{}({})", tool, pattern)
}
