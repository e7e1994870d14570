// file: src/answer/synthesizer.rs
// description: retrieval-augmented answer generation with cited sources
// reference: "stuff" retrieval QA, all retrieved chunks in one prompt

use crate::answer::chat::{ChatMessage, ChatModel};
use crate::answer::patterns::{FINAL_ANSWER_PREFIX, SOURCES_MARKER, SOURCES_SPLIT};
use crate::answer::prompt::{PromptTemplate, SYSTEM_PROMPT, render_summaries};
use crate::error::Result;
use crate::index::SimilarityIndex;
use crate::models::{Answer, Chunk};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

pub struct AnswerSynthesizer {
    model: Arc<dyn ChatModel>,
    prompt: PromptTemplate,
    top_k: usize,
}

impl AnswerSynthesizer {
    pub fn new(model: Arc<dyn ChatModel>, top_k: usize) -> Self {
        Self {
            model,
            prompt: PromptTemplate::qa(),
            top_k,
        }
    }

    pub async fn answer(&self, index: &SimilarityIndex, question: &str) -> Result<Answer> {
        let retrieved = index.retrieve(question, self.top_k).await?;
        info!(
            "Retrieved {} of {} chunks as context",
            retrieved.len(),
            index.len()
        );

        let context: Vec<Chunk> = retrieved.into_iter().map(|scored| scored.chunk).collect();
        let messages = self.build_messages(question, &context)?;

        let reply = self.model.complete(&messages).await?;
        debug!("Model reply: {} chars", reply.len());

        let (answer, sources) = parse_reply(&reply);
        Ok(Answer {
            answer,
            sources,
            context,
        })
    }

    pub fn build_messages(&self, question: &str, context: &[Chunk]) -> Result<Vec<ChatMessage>> {
        let summaries = render_summaries(context)?;
        let values = HashMap::from([("question", question), ("summaries", summaries.as_str())]);
        let prompt = self.prompt.render(&values)?;

        Ok(vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)])
    }
}

/// Split a reply into answer text and the comma-delimited sources line.
///
/// Without a `SOURCES:` marker the whole reply is the answer and no sources
/// are reported. Only the first line after the marker counts as sources.
pub fn parse_reply(reply: &str) -> (String, String) {
    if !SOURCES_MARKER.is_match(reply) {
        return (clean_answer(reply), String::new());
    }

    let mut parts = SOURCES_SPLIT.splitn(reply, 3);
    let answer = parts.next().unwrap_or_default();
    let sources = parts
        .next()
        .and_then(|rest| rest.lines().next())
        .unwrap_or_default()
        .trim()
        .to_string();

    (clean_answer(answer), sources)
}

fn clean_answer(text: &str) -> String {
    FINAL_ANSWER_PREFIX.replace(text, "").trim().to_string()
}
