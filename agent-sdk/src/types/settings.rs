//! Settings file passed to the CLI with `--settings`.

use serde::{Deserialize, Serialize};

use crate::types::{PermissionSettings, SandboxSettings};

/// Contents of a Claude settings file.
///
/// Field order is preserved when serialized: `sandbox` first, then `permissions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaudeSettings {
    pub sandbox: SandboxSettings,
    pub permissions: PermissionSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PermissionMode, tool_rule};

    #[test]
    fn test_settings_field_order() {
        let settings = ClaudeSettings {
            sandbox: SandboxSettings::isolated(),
            permissions: PermissionSettings::new(PermissionMode::AcceptEdits)
                .allow(tool_rule("Read", "./**")),
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let sandbox_at = json.find("\"sandbox\"").unwrap();
        let permissions_at = json.find("\"permissions\"").unwrap();
        assert!(sandbox_at < permissions_at);
        assert!(json.contains("\"autoAllowBashIfSandboxed\": true"));
        assert!(json.contains("\n  \"sandbox\": {"));
    }
}
