//! Output language directory.

/// Language code that needs no extra instruction in the system prompt.
pub const DEFAULT_LANGUAGE: &str = "en";

const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("ko", "Korean"),
    ("ja", "Japanese"),
    ("zh", "Chinese"),
    ("zh-CN", "Simplified Chinese"),
    ("zh-TW", "Traditional Chinese"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("it", "Italian"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("tr", "Turkish"),
    ("vi", "Vietnamese"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
];

/// Display name for a language code.
///
/// Unknown codes are returned unchanged.
pub fn display_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Whether `code` selects the default language. Blank codes do.
pub fn is_default(code: &str) -> bool {
    code.trim().is_empty() || code == DEFAULT_LANGUAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(display_name("en"), "English");
        assert_eq!(display_name("ko"), "Korean");
        assert_eq!(display_name("zh-TW"), "Traditional Chinese");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(display_name("xx"), "xx");
        assert_eq!(display_name(""), "");
        // Lookup is exact; case variants are not folded.
        assert_eq!(display_name("KO"), "KO");
    }

    #[test]
    fn test_default_language() {
        assert!(is_default("en"));
        assert!(!is_default("ko"));
        assert!(!is_default("EN"));
        assert!(is_default(""));
        assert!(is_default("  "));
    }
}
