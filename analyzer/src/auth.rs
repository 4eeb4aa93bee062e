//! Credential precondition check.

use tracing::debug;

use crate::error::{AnalyzerError, Result};

/// Environment variables searched for a token, in priority order.
pub const TOKEN_VARS: [&str; 2] = ["CLAUDE_CODE_OAUTH_TOKEN", "ANTHROPIC_API_KEY"];

/// Something that can tell whether a usable credential exists.
pub trait CredentialSource: Send + Sync {
    /// Fail with [`AnalyzerError::MissingCredential`] if no credential is available.
    fn require_token(&self) -> Result<()>;
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Credentials taken from [`TOKEN_VARS`]. Blank values count as absent.
pub struct EnvCredentials {
    lookup: Lookup,
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok())
    }

    pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }

    /// Name of the first variable holding a non-blank token.
    pub fn resolve(&self) -> Option<&'static str> {
        TOKEN_VARS
            .into_iter()
            .find(|var| (self.lookup)(*var).is_some_and(|v| !v.trim().is_empty()))
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for EnvCredentials {
    fn require_token(&self) -> Result<()> {
        match self.resolve() {
            Some(var) => {
                debug!("Using credential from {}", var);
                Ok(())
            }
            None => Err(AnalyzerError::MissingCredential),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_token_preferred() {
        let creds = EnvCredentials::with_lookup(|_| Some("token".to_string()));
        assert_eq!(creds.resolve(), Some("CLAUDE_CODE_OAUTH_TOKEN"));
        assert!(creds.require_token().is_ok());
    }

    #[test]
    fn test_api_key_fallback() {
        let creds = EnvCredentials::with_lookup(|key| match key {
            "CLAUDE_CODE_OAUTH_TOKEN" => Some("  ".to_string()),
            "ANTHROPIC_API_KEY" => Some("sk-ant".to_string()),
            _ => None,
        });
        assert_eq!(creds.resolve(), Some("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_missing_credential() {
        let creds = EnvCredentials::with_lookup(|_| None);
        assert!(matches!(
            creds.require_token(),
            Err(AnalyzerError::MissingCredential)
        ));
    }
}
