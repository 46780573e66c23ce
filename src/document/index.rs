//! Read-only lexical index over report chunks

use super::chunker::{chunk_document, Chunk};
use super::loader::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Search parameters for retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Maximum number of excerpts to return
    pub top_k: usize,
    /// Minimum score (0.0 to 1.0) for a chunk to count as relevant
    pub threshold: f32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            top_k: 4,
            threshold: 0.1,
        }
    }
}

/// A chunk together with its relevance score for one query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// Pre-built searchable form of the report
///
/// Built once before the first retrieval; read-only afterwards, so it can be
/// shared across concurrent runs behind an `Arc`.
#[derive(Debug)]
pub struct DocumentIndex {
    chunks: Vec<Chunk>,
    chunk_tokens: Vec<HashSet<String>>,
}

/// Boost added when the query names the chunk's section outright
const SECTION_MATCH_BOOST: f32 = 0.5;

impl DocumentIndex {
    /// Chunk and tokenize the document
    pub fn build(document: &Document, max_chunk_chars: usize) -> Self {
        let chunks = chunk_document(document, max_chunk_chars);
        let chunk_tokens = chunks
            .iter()
            .map(|c| tokenize(&c.text).into_iter().collect())
            .collect();

        Self {
            chunks,
            chunk_tokens,
        }
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Score every chunk against the query; return the top matches above the
    /// threshold, best first. An empty result means the report has nothing
    /// relevant, which is a valid outcome, not a fault.
    pub fn search(&self, query: &str, params: &SearchParams) -> Vec<ScoredChunk> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .zip(&self.chunk_tokens)
            .filter_map(|(chunk, tokens)| {
                let score = score_chunk(chunk, tokens, &query_tokens);
                if score >= params.threshold {
                    Some(ScoredChunk {
                        chunk: chunk.clone(),
                        score,
                    })
                } else {
                    None
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(params.top_k);

        scored
    }
}

/// Fraction of query tokens present in the chunk, boosted when the chunk's
/// section label itself matches. Capped at 1.0.
fn score_chunk(chunk: &Chunk, tokens: &HashSet<String>, query_tokens: &[String]) -> f32 {
    let matches = query_tokens.iter().filter(|t| tokens.contains(*t)).count();
    let overlap = matches as f32 / query_tokens.len() as f32;

    let section_boost = match &chunk.section {
        Some(section) => {
            let section_tokens = tokenize(section);
            if query_tokens.iter().any(|t| section_tokens.contains(t)) {
                SECTION_MATCH_BOOST
            } else {
                0.0
            }
        }
        None => 0.0,
    };

    (overlap + section_boost).min(1.0)
}

/// Lowercase alphanumeric words, single-character noise dropped
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 1)
        .map(|w| w.to_lowercase())
        .collect()
}
