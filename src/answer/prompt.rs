// file: src/answer/prompt.rs
// description: prompt template rendering for retrieval QA with sources
// reference: placeholder substitution in the style of utils::template

use crate::answer::patterns::PLACEHOLDER;
use crate::error::{PipelineError, Result};
use crate::models::Chunk;
use std::collections::HashMap;

pub const SYSTEM_PROMPT: &str = "You answer questions using only the document extracts you are given. \
If the extracts do not contain the answer, say that you don't know. Don't try to make up an answer.";

pub const QA_TEMPLATE: &str = "Given the following extracted parts of one or more documents and a question, \
create a final answer with references (\"SOURCES\").
If you don't know the answer, just say that you don't know.
ALWAYS return a \"SOURCES\" part in your answer, listing the sources you used separated by commas.

QUESTION: {question}
=========
{summaries}
=========
FINAL ANSWER:";

pub const DOCUMENT_TEMPLATE: &str = "Content: {content}\nSource: {source}";

const DOCUMENT_SEPARATOR: &str = "\n\n";

pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn qa() -> Self {
        Self::new(QA_TEMPLATE)
    }

    pub fn document() -> Self {
        Self::new(DOCUMENT_TEMPLATE)
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in PLACEHOLDER.captures_iter(&self.template) {
            let name = caps[1].to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Substitute every placeholder. A placeholder without a value is an error.
    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String> {
        if let Some(missing) = self
            .placeholders()
            .into_iter()
            .find(|name| !values.contains_key(name.as_str()))
        {
            return Err(PipelineError::Validation(format!(
                "Prompt template is missing a value for {{{}}}",
                missing
            )));
        }

        let rendered = PLACEHOLDER.replace_all(&self.template, |caps: &regex::Captures| {
            values.get(&caps[1]).copied().unwrap_or_default().to_string()
        });

        Ok(rendered.into_owned())
    }
}

/// Render retrieved chunks into the `summaries` block of the QA prompt.
pub fn render_summaries(chunks: &[Chunk]) -> Result<String> {
    let template = PromptTemplate::document();
    let parts = chunks
        .iter()
        .map(|chunk| {
            let values = HashMap::from([
                ("content", chunk.content.as_str()),
                ("source", chunk.source.as_str()),
            ]);
            template.render(&values)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(parts.join(DOCUMENT_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(PromptTemplate::qa().placeholders(), vec!["question", "summaries"]);
        assert_eq!(PromptTemplate::document().placeholders(), vec!["content", "source"]);
    }

    #[test]
    fn test_render() {
        let template = PromptTemplate::new("Q: {question} / {question}");
        let values = HashMap::from([("question", "why")]);
        assert_eq!(template.render(&values).unwrap(), "Q: why / why");
    }

    #[test]
    fn test_render_missing_value() {
        let values = HashMap::from([("question", "why")]);
        assert!(PromptTemplate::qa().render(&values).is_err());
    }

    #[test]
    fn test_render_summaries() {
        let chunks = vec![
            Chunk::new("Article 1 text", "ai-act.pdf"),
            Chunk::new("FAQ text", "faq.pdf"),
        ];

        let summaries = render_summaries(&chunks).unwrap();
        assert_eq!(
            summaries,
            "Content: Article 1 text\nSource: ai-act.pdf\n\nContent: FAQ text\nSource: faq.pdf"
        );
    }

    #[test]
    fn test_values_are_not_reinterpreted() {
        let template = PromptTemplate::document();
        let values = HashMap::from([("content", "{source}"), ("source", "a.pdf")]);
        assert_eq!(template.render(&values).unwrap(), "Content: {source}\nSource: a.pdf");
    }
}
