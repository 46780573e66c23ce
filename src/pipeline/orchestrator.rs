//! Pipeline orchestrator - sequences retrieval then composition
//!
//! One `run` per query: validate the query, run the retrieval stage, hand its
//! result (and nothing else) to the composition stage, driving the state
//! machine on every outcome. No retries at this level; a stage failure
//! terminates the run.

use crate::composition::{CompositionResult, EmailWriter};
use crate::errors::{PipelineError, Result};
use crate::pipeline::observer::{NoopObserver, PipelineObserver, Stage};
use crate::pipeline::state::{PipelineState, StateEvent};
use crate::retrieval::{RetrievalEngine, RetrievalResult};
use std::sync::Arc;
use uuid::Uuid;

/// Everything one completed run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub retrieval: RetrievalResult,
    pub composition: CompositionResult,
}

/// The retrieve-then-compose pipeline
pub struct Pipeline {
    retrieval: RetrievalEngine,
    composition: EmailWriter,
    observer: Arc<dyn PipelineObserver>,
}

impl Pipeline {
    pub fn new(retrieval: RetrievalEngine, composition: EmailWriter) -> Self {
        Self {
            retrieval,
            composition,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Inject an observer for this pipeline's runs
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Execute one run. Returns the terminal artifact or the failure that
    /// ended the run; the state machine lands in Done or Failed either way.
    pub async fn run(&self, query: &str) -> Result<RunOutcome> {
        if query.trim().is_empty() {
            // Rejected before the retrieval stage ever runs
            return Err(PipelineError::RetrievalFailure(
                "query must be non-empty".to_string(),
            ));
        }

        let run_id = Uuid::new_v4();
        let mut state = PipelineState::AwaitingRetrieval;
        self.observer.on_run_started(run_id, query);

        // Stage 1: retrieval
        self.observer.on_stage_started(run_id, Stage::Retrieval);
        let retrieval = match self.retrieval.answer(query).await {
            Ok(result) => {
                self.observer
                    .on_stage_completed(run_id, Stage::Retrieval, true);
                state = self.advance(run_id, state, StateEvent::RetrievalSucceeded)?;
                result
            }
            Err(e) => {
                self.observer
                    .on_stage_completed(run_id, Stage::Retrieval, false);
                self.advance(run_id, state, StateEvent::RetrievalFailed)?;
                return Err(e);
            }
        };

        // Stage 2: composition, fed only by stage 1's result
        self.observer.on_stage_started(run_id, Stage::Composition);
        let composition = match self.composition.compose(&retrieval).await {
            Ok(result) => {
                self.observer
                    .on_stage_completed(run_id, Stage::Composition, true);
                state = self.advance(run_id, state, StateEvent::CompositionSucceeded)?;
                result
            }
            Err(e) => {
                self.observer
                    .on_stage_completed(run_id, Stage::Composition, false);
                self.advance(run_id, state, StateEvent::CompositionFailed)?;
                return Err(e);
            }
        };

        debug_assert!(state.is_terminal());

        Ok(RunOutcome {
            run_id,
            retrieval,
            composition,
        })
    }

    fn advance(
        &self,
        run_id: Uuid,
        state: PipelineState,
        event: StateEvent,
    ) -> Result<PipelineState> {
        let next = state.transition(event)?;
        self.observer.on_transition(run_id, state, next);
        Ok(next)
    }
}
