//! Retrieval engine: search the report, answer from excerpts only
//!
//! Flow per query: lexical search over the pre-built index, then one
//! generation call constrained to the matching excerpts. No matching
//! excerpts is a valid soft result ("no answer found"), never an error.

use crate::document::{DocumentIndex, ScoredChunk, SearchParams};
use crate::errors::{PipelineError, Result};
use crate::llm::{ChatMessage, TextGenerator};
use std::sync::Arc;

/// Fixed wording of the soft-failure result, produced without a generation
/// call so the no-answer path stays deterministic.
pub const NO_ANSWER_FOUND: &str =
    "No relevant information was found in the inspection report for this question.";

const RESEARCH_SYSTEM_PROMPT: &str = "\
You are a research assistant adept at searching and extracting data from \
documents, ensuring accurate and prompt responses. Answer the customer's \
question using ONLY the report excerpts provided. Be clear and accurate. \
If the excerpts do not answer the question, say that no relevant \
information was found.";

/// Output of the retrieval stage, consumed exactly once by composition
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    /// The question that was asked
    pub query: String,
    /// Answer text (or the fixed no-answer sentence)
    pub answer: String,
    /// Whether any report content backed the answer
    pub grounded: bool,
    /// Ids of the excerpts the answer was drawn from
    pub source_chunks: Vec<usize>,
}

/// Retrieval stage over one pre-indexed report
pub struct RetrievalEngine {
    index: Arc<DocumentIndex>,
    generator: Arc<dyn TextGenerator>,
    params: SearchParams,
}

impl RetrievalEngine {
    pub fn new(
        index: Arc<DocumentIndex>,
        generator: Arc<dyn TextGenerator>,
        params: SearchParams,
    ) -> Self {
        Self {
            index,
            generator,
            params,
        }
    }

    /// Answer `query` from the report.
    ///
    /// Errors only when the index is unusable or the generator fails; an
    /// unanswerable question returns an ungrounded result stating so.
    pub async fn answer(&self, query: &str) -> Result<RetrievalResult> {
        if self.index.is_empty() {
            return Err(PipelineError::RetrievalFailure(
                "document index is empty".to_string(),
            ));
        }

        let matches = self.index.search(query, &self.params);

        if matches.is_empty() {
            return Ok(RetrievalResult {
                query: query.to_string(),
                answer: NO_ANSWER_FOUND.to_string(),
                grounded: false,
                source_chunks: Vec::new(),
            });
        }

        let prompt = build_prompt(query, &matches);
        let answer = self
            .generator
            .generate(vec![
                ChatMessage::system(RESEARCH_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ])
            .await
            .map_err(|e| PipelineError::RetrievalFailure(e.to_string()))?;

        if answer.trim().is_empty() {
            return Err(PipelineError::RetrievalFailure(
                "generator returned an empty answer".to_string(),
            ));
        }

        Ok(RetrievalResult {
            query: query.to_string(),
            answer,
            grounded: true,
            source_chunks: matches.iter().map(|m| m.chunk.id).collect(),
        })
    }

    /// Search parameters in effect
    pub fn params(&self) -> &SearchParams {
        &self.params
    }
}

/// Excerpts first, question last, numbered the way the index ranked them
fn build_prompt(query: &str, matches: &[ScoredChunk]) -> String {
    let mut prompt = String::from("Report excerpts:\n");

    for (i, scored) in matches.iter().enumerate() {
        let section = scored
            .chunk
            .section
            .as_deref()
            .unwrap_or("(unlabeled section)");
        prompt.push_str(&format!(
            "\n[Excerpt {} - {}]\n{}\n",
            i + 1,
            section,
            scored.chunk.text
        ));
    }

    prompt.push_str(&format!("\nCustomer question: {}", query));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, DocumentIndex};
    use async_trait::async_trait;

    const REPORT: &str = "\
Roof:
The shingles show wear and should be replaced within 1 year.

Plumbing:
No leaks observed.
";

    /// Echoes the user prompt back so tests can assert on what the stage sent
    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, messages: Vec<ChatMessage>) -> Result<String> {
            Ok(messages.last().map(|m| m.content.clone()).unwrap_or_default())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _messages: Vec<ChatMessage>) -> Result<String> {
            Err(PipelineError::GenerationFailure("HTTP 503".to_string()))
        }
    }

    fn engine(generator: Arc<dyn TextGenerator>) -> RetrievalEngine {
        let index = Arc::new(DocumentIndex::build(&Document::from_text(REPORT), 1600));
        RetrievalEngine::new(index, generator, SearchParams::default())
    }

    #[tokio::test]
    async fn test_answer_is_grounded_in_matching_excerpts() {
        let engine = engine(Arc::new(EchoGenerator));
        let result = engine.answer("Roof").await.unwrap();

        assert!(result.grounded);
        assert!(result.answer.contains("shingles"));
        assert!(result.answer.contains("replace"));
        assert!(!result.source_chunks.is_empty());
    }

    #[tokio::test]
    async fn test_excerpts_exclude_unrelated_sections() {
        let engine = engine(Arc::new(EchoGenerator));
        let result = engine.answer("Roof").await.unwrap();
        assert!(!result.answer.contains("leaks"));
    }

    #[tokio::test]
    async fn test_no_match_is_soft_result_not_error() {
        let engine = engine(Arc::new(EchoGenerator));
        let result = engine.answer("Electrical").await.unwrap();

        assert!(!result.grounded);
        assert_eq!(result.answer, NO_ANSWER_FOUND);
        assert!(result.source_chunks.is_empty());
    }

    #[tokio::test]
    async fn test_no_match_skips_the_generator() {
        // The no-answer path must not depend on the endpoint at all
        let engine = engine(Arc::new(FailingGenerator));
        let result = engine.answer("Electrical").await.unwrap();
        assert_eq!(result.answer, NO_ANSWER_FOUND);
    }

    #[tokio::test]
    async fn test_generator_failure_maps_to_retrieval_failure() {
        let engine = engine(Arc::new(FailingGenerator));
        let result = engine.answer("Roof").await;
        assert!(matches!(result, Err(PipelineError::RetrievalFailure(_))));
    }

    #[tokio::test]
    async fn test_empty_index_is_retrieval_failure() {
        let index = Arc::new(DocumentIndex::build(&Document::from_text("\n"), 1600));
        let engine = RetrievalEngine::new(index, Arc::new(EchoGenerator), SearchParams::default());

        let result = engine.answer("Roof").await;
        assert!(matches!(result, Err(PipelineError::RetrievalFailure(_))));
    }
}
