//! Retrieval Stage: answer a question from the indexed report

pub mod engine;

pub use engine::{RetrievalEngine, RetrievalResult, NO_ANSWER_FOUND};
