// file: src/answer/patterns.rs
// description: compiled regex patterns for prompt rendering and reply parsing
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Prompt placeholders such as {question}
    pub static ref PLACEHOLDER: Regex = Regex::new(
        r"\{([a-z_]+)\}"
    ).expect("PLACEHOLDER regex is valid");

    // Model replies
    pub static ref SOURCES_MARKER: Regex = Regex::new(
        r"(?i)SOURCES?:"
    ).expect("SOURCES_MARKER regex is valid");

    pub static ref SOURCES_SPLIT: Regex = Regex::new(
        r"(?i)SOURCES?:|QUESTION:\s"
    ).expect("SOURCES_SPLIT regex is valid");

    pub static ref FINAL_ANSWER_PREFIX: Regex = Regex::new(
        r"(?i)^\s*FINAL ANSWER:\s*"
    ).expect("FINAL_ANSWER_PREFIX regex is valid");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_marker() {
        assert!(SOURCES_MARKER.is_match("answer\nSOURCES: a.pdf"));
        assert!(SOURCES_MARKER.is_match("answer\nSource: a.pdf"));
        assert!(!SOURCES_MARKER.is_match("no citations here"));
    }

    #[test]
    fn test_final_answer_prefix() {
        assert_eq!(FINAL_ANSWER_PREFIX.replace("FINAL ANSWER: yes", ""), "yes");
        assert_eq!(FINAL_ANSWER_PREFIX.replace("yes", ""), "yes");
    }
}
