//! System prompt construction.

use std::path::Path;

use crate::language;

/// Build the system prompt for an analysis session.
///
/// `project_dir` should already be absolute. A language clause is appended
/// only for non-default languages; it covers human-readable values, never
/// JSON keys.
pub fn build_system_prompt(project_dir: &Path, language: &str) -> String {
    let mut prompt = format!(
        "You are a senior software architect analyzing this codebase.\n\
         Your working directory is: {}\n\
         Use the Read, Grep, and Glob tools to examine the actual code before drawing conclusions.\n\
         Output your analysis as valid JSON only, with no surrounding prose or code fences.",
        project_dir.display(),
    );

    if !language::is_default(language) {
        let name = language::display_name(language);
        prompt.push_str(&format!(
            "\n\nLANGUAGE REQUIREMENT: Write every human-readable value in the JSON \
             (descriptions, titles, summaries, recommendations) in {name}. \
             Keep all JSON keys in English exactly as specified."
        ));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_has_no_clause() {
        let prompt = build_system_prompt(Path::new("/repo"), "en");
        assert!(prompt.contains("Your working directory is: /repo"));
        assert!(prompt.contains("Read, Grep, and Glob"));
        assert!(prompt.contains("valid JSON only"));
        assert!(!prompt.contains("LANGUAGE REQUIREMENT"));
    }

    #[test]
    fn test_blank_language_has_no_clause() {
        for code in ["", " "] {
            let prompt = build_system_prompt(Path::new("/repo"), code);
            assert!(!prompt.contains("LANGUAGE REQUIREMENT"));
            assert!(!prompt.contains(" in ."));
        }
    }

    #[test]
    fn test_known_language_uses_display_name() {
        let prompt = build_system_prompt(Path::new("/repo"), "ko");
        assert!(prompt.contains("LANGUAGE REQUIREMENT"));
        assert!(prompt.contains("in Korean."));
        assert!(prompt.contains("JSON keys in English"));
    }

    #[test]
    fn test_unknown_language_uses_raw_code() {
        let prompt = build_system_prompt(Path::new("/repo"), "xx");
        assert!(prompt.contains("in xx."));
    }
}
