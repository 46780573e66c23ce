//! Email writer: one generation call, signature appended by code
//!
//! The model drafts the body only. The signature block is rendered from
//! configuration and appended after generation, so it appears verbatim at
//! the end of every email regardless of what the model produces.

use crate::config::SignatureBlock;
use crate::errors::{PipelineError, Result};
use crate::llm::{ChatMessage, TextGenerator};
use crate::retrieval::RetrievalResult;
use std::sync::Arc;

const WRITER_SYSTEM_PROMPT: &str = "\
You are a professional writer with excellent writing skills, able to craft \
clear and concise emails based on the provided information. Write a \
professional email to a contractor about findings from a home inspection \
report. Clearly state the issues found in the specified section and request \
a quote or an action plan for fixing them. If the findings state that no \
relevant information was found, write a brief note saying no issues were \
identified in that section. Do NOT add a closing or signature; it is \
appended separately.";

/// Terminal artifact of the pipeline: the full email text
#[derive(Debug, Clone)]
pub struct CompositionResult {
    /// Email body plus signature; the signature block is always the final lines
    pub email: String,
}

/// Composition stage
pub struct EmailWriter {
    generator: Arc<dyn TextGenerator>,
    signature: SignatureBlock,
}

impl EmailWriter {
    pub fn new(generator: Arc<dyn TextGenerator>, signature: SignatureBlock) -> Self {
        Self {
            generator,
            signature,
        }
    }

    /// Draft the contractor email from the retrieval stage's findings
    pub async fn compose(&self, input: &RetrievalResult) -> Result<CompositionResult> {
        if input.answer.trim().is_empty() {
            return Err(PipelineError::CompositionFailure(
                "retrieval result was empty".to_string(),
            ));
        }

        let prompt = format!(
            "Report section in question: {}\n\nFindings:\n{}",
            input.query, input.answer
        );

        let body = self
            .generator
            .generate(vec![
                ChatMessage::system(WRITER_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ])
            .await
            .map_err(|e| PipelineError::CompositionFailure(e.to_string()))?;

        let body = body.trim();
        if body.is_empty() {
            return Err(PipelineError::CompositionFailure(
                "generator returned an empty email body".to_string(),
            ));
        }

        Ok(CompositionResult {
            email: format!("{}\n\n{}", body, self.signature.render()),
        })
    }

    /// Signature block in effect
    pub fn signature(&self) -> &SignatureBlock {
        &self.signature
    }
}
