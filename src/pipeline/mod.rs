// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
mod progress;

pub use orchestrator::{
    DEFAULT_QUESTION, NOTHING_TO_ANSWER, PipelineOrchestrator, RunReport, write_answer,
};
pub use progress::{ProgressTracker, RunStats};
