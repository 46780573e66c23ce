//! Observer seam for pipeline instrumentation
//!
//! Observation is injected into the orchestrator per run, never installed as
//! process-global state. The telemetry collector implements this trait; the
//! no-op impl is the default.

use crate::pipeline::state::PipelineState;
use uuid::Uuid;

/// The two pipeline stages, as reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Retrieval,
    Composition,
}

impl Stage {
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Retrieval => "retrieval",
            Stage::Composition => "composition",
        }
    }
}

/// Callbacks fired by the orchestrator as a run progresses
pub trait PipelineObserver: Send + Sync {
    fn on_run_started(&self, _run_id: Uuid, _query: &str) {}

    fn on_stage_started(&self, _run_id: Uuid, _stage: Stage) {}

    fn on_stage_completed(&self, _run_id: Uuid, _stage: Stage, _success: bool) {}

    fn on_transition(&self, _run_id: Uuid, _from: PipelineState, _to: PipelineState) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}
