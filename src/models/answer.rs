// file: src/models/answer.rs
// description: synthesized answer with cited sources
// reference: internal data structures

use crate::models::document::Chunk;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,

    /// Comma-delimited file names the model reported using
    pub sources: String,

    /// Chunks that were placed into the prompt context
    pub context: Vec<Chunk>,
}

impl Answer {
    pub fn source_lines(&self) -> Vec<String> {
        format_sources(&self.sources)
    }
}

/// Split a comma-delimited source list into one trimmed entry per line.
pub fn format_sources(sources: &str) -> Vec<String> {
    sources
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sources() {
        let lines = format_sources("a.pdf,b.pdf,c.pdf");
        assert_eq!(lines, vec!["a.pdf", "b.pdf", "c.pdf"]);
        assert_eq!(lines.join("\n"), "a.pdf\nb.pdf\nc.pdf");
    }

    #[test]
    fn test_format_sources_trims_and_skips_empty() {
        assert_eq!(format_sources(" a.pdf, b.pdf ,"), vec!["a.pdf", "b.pdf"]);
        assert!(format_sources("").is_empty());
    }

    #[test]
    fn test_source_lines() {
        let answer = Answer {
            answer: "It is a regulation.".to_string(),
            sources: "ai-act.pdf, faq.pdf".to_string(),
            context: vec![],
        };
        assert_eq!(answer.source_lines(), vec!["ai-act.pdf", "faq.pdf"]);
    }
}
