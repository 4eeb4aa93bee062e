//! Sandbox settings for Claude Agent SDK.

use serde::{Deserialize, Serialize};

/// The `sandbox` section of a Claude settings file.
///
/// With `auto_allow_bash_if_sandboxed`, Bash runs without a prompt but only
/// inside the sandbox boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxSettings {
    pub enabled: bool,
    #[serde(default)]
    pub auto_allow_bash_if_sandboxed: bool,
}

impl SandboxSettings {
    /// Sandbox enabled, Bash auto-allowed inside it.
    pub fn isolated() -> Self {
        Self {
            enabled: true,
            auto_allow_bash_if_sandboxed: true,
        }
    }
}
