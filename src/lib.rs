//! workorder - inspection report to contractor email
//!
//! A two-stage sequential pipeline over one fixed document:
//!
//! - **Retrieval**: answer the caller's question from the pre-indexed report
//! - **Composition**: draft a contractor email from that answer, closed with
//!   a fixed signature block
//!
//! The stages are sequenced by an explicit state machine
//! (`AwaitingRetrieval → AwaitingComposition → Done`, failures → `Failed`).
//! Both stages reach the hosted model through the [`llm::TextGenerator`]
//! seam.

pub mod errors;
pub mod config;
pub mod document;
pub mod llm;
pub mod retrieval;
pub mod composition;
pub mod pipeline;
pub mod telemetry;
pub mod cli;

// Re-export commonly used types
pub use errors::{PipelineError, Result};
pub use pipeline::{Pipeline, RunOutcome};
