//! Model shorthand resolution.

use std::collections::HashMap;

/// Maps a model shorthand to a concrete model identifier.
pub trait ModelResolver: Send + Sync {
    fn resolve(&self, shorthand: &str) -> String;
}

const BUILTIN_MODELS: &[(&str, &str, &str)] = &[
    ("haiku", "claude-haiku-4-5-20251001", "ANTHROPIC_DEFAULT_HAIKU_MODEL"),
    ("sonnet", "claude-sonnet-4-5-20250929", "ANTHROPIC_DEFAULT_SONNET_MODEL"),
    ("opus", "claude-opus-4-5-20251101", "ANTHROPIC_DEFAULT_OPUS_MODEL"),
];

/// Built-in shorthand table with optional per-shorthand overrides.
///
/// Anything that is not a known shorthand is treated as a full model id.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    overrides: HashMap<String, String>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog honoring `ANTHROPIC_DEFAULT_{HAIKU,SONNET,OPUS}_MODEL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut catalog = Self::new();
        for &(shorthand, _, var) in BUILTIN_MODELS {
            if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
                catalog.overrides.insert(shorthand.to_string(), value.trim().to_string());
            }
        }
        catalog
    }

    pub fn with_override(mut self, shorthand: impl Into<String>, model_id: impl Into<String>) -> Self {
        self.overrides.insert(shorthand.into(), model_id.into());
        self
    }
}

impl ModelResolver for ModelCatalog {
    fn resolve(&self, shorthand: &str) -> String {
        if let Some(model_id) = self.overrides.get(shorthand) {
            return model_id.clone();
        }
        BUILTIN_MODELS
            .iter()
            .find(|(name, _, _)| *name == shorthand)
            .map(|(_, model_id, _)| model_id.to_string())
            .unwrap_or_else(|| shorthand.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shorthands() {
        let catalog = ModelCatalog::new();
        assert_eq!(catalog.resolve("sonnet"), "claude-sonnet-4-5-20250929");
        assert_eq!(catalog.resolve("haiku"), "claude-haiku-4-5-20251001");
        assert_eq!(catalog.resolve("opus"), "claude-opus-4-5-20251101");
    }

    #[test]
    fn test_full_ids_pass_through() {
        let catalog = ModelCatalog::new();
        assert_eq!(catalog.resolve("claude-3-7-sonnet-latest"), "claude-3-7-sonnet-latest");
    }

    #[test]
    fn test_env_overrides() {
        let catalog = ModelCatalog::from_lookup(|key| match key {
            "ANTHROPIC_DEFAULT_SONNET_MODEL" => Some(" custom-sonnet ".to_string()),
            "ANTHROPIC_DEFAULT_OPUS_MODEL" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(catalog.resolve("sonnet"), "custom-sonnet");
        assert_eq!(catalog.resolve("opus"), "claude-opus-4-5-20251101");
    }

    #[test]
    fn test_explicit_override() {
        let catalog = ModelCatalog::new().with_override("haiku", "my-haiku");
        assert_eq!(catalog.resolve("haiku"), "my-haiku");
    }
}
