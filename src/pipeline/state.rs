//! Pipeline state machine
//!
//! Deterministic finite state machine over one run:
//! - Safety: composition is unreachable before a successful retrieval
//! - Liveness: every run ends in Done or Failed
//! - Determinism: unique next state per (state, event)

use crate::errors::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Run execution states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineState {
    /// Initial state - waiting for the retrieval stage to produce an answer
    AwaitingRetrieval,

    /// Retrieval succeeded - waiting for the composition stage
    AwaitingComposition,

    /// Run completed with a full CompositionResult (terminal)
    Done,

    /// A stage failed; the run has no output (terminal)
    Failed,
}

/// Events that drive state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// Retrieval stage produced a RetrievalResult
    RetrievalSucceeded,

    /// Retrieval stage raised a RetrievalFailure
    RetrievalFailed,

    /// Composition stage produced a CompositionResult
    CompositionSucceeded,

    /// Composition stage raised a CompositionFailure
    CompositionFailed,
}

impl PipelineState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// Attempt state transition with validation
    ///
    /// Valid transitions:
    /// 1. AwaitingRetrieval   → AwaitingComposition (on: RetrievalSucceeded)
    /// 2. AwaitingRetrieval   → Failed              (on: RetrievalFailed)
    /// 3. AwaitingComposition → Done                (on: CompositionSucceeded)
    /// 4. AwaitingComposition → Failed              (on: CompositionFailed)
    ///
    /// Terminal states accept no events.
    pub fn transition(&self, event: StateEvent) -> Result<PipelineState> {
        use PipelineState::*;
        use StateEvent::*;

        let next_state = match (self, event) {
            (AwaitingRetrieval, RetrievalSucceeded) => AwaitingComposition,
            (AwaitingRetrieval, RetrievalFailed) => Failed,

            (AwaitingComposition, CompositionSucceeded) => Done,
            (AwaitingComposition, CompositionFailed) => Failed,

            (from, event) => {
                return Err(PipelineError::InvalidTransition {
                    from: format!("{:?}", from),
                    to: format!("(via {:?})", event),
                    reason: format!("No valid transition from {:?} on {:?}", from, event),
                });
            }
        };

        Ok(next_state)
    }

    /// Get all valid events from this state
    pub fn valid_events(&self) -> Vec<StateEvent> {
        use PipelineState::*;
        use StateEvent::*;

        match self {
            AwaitingRetrieval => vec![RetrievalSucceeded, RetrievalFailed],
            AwaitingComposition => vec![CompositionSucceeded, CompositionFailed],
            Done | Failed => vec![],
        }
    }

    /// Human-readable state name
    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineState::AwaitingRetrieval => "Awaiting Retrieval",
            PipelineState::AwaitingComposition => "Awaiting Composition",
            PipelineState::Done => "Done",
            PipelineState::Failed => "Failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let state = PipelineState::AwaitingRetrieval;

        let state = state.transition(StateEvent::RetrievalSucceeded).unwrap();
        assert_eq!(state, PipelineState::AwaitingComposition);

        let state = state.transition(StateEvent::CompositionSucceeded).unwrap();
        assert_eq!(state, PipelineState::Done);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_retrieval_failure_skips_composition() {
        let state = PipelineState::AwaitingRetrieval
            .transition(StateEvent::RetrievalFailed)
            .unwrap();
        assert_eq!(state, PipelineState::Failed);
        assert!(state.is_terminal());
        assert!(state.valid_events().is_empty());
    }

    #[test]
    fn test_composition_failure_terminates() {
        let state = PipelineState::AwaitingComposition
            .transition(StateEvent::CompositionFailed)
            .unwrap();
        assert_eq!(state, PipelineState::Failed);
    }

    #[test]
    fn test_composition_events_invalid_before_retrieval() {
        let result =
            PipelineState::AwaitingRetrieval.transition(StateEvent::CompositionSucceeded);
        assert!(result.is_err());

        let result = PipelineState::AwaitingRetrieval.transition(StateEvent::CompositionFailed);
        assert!(result.is_err());
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        for terminal in [PipelineState::Done, PipelineState::Failed] {
            for event in [
                StateEvent::RetrievalSucceeded,
                StateEvent::RetrievalFailed,
                StateEvent::CompositionSucceeded,
                StateEvent::CompositionFailed,
            ] {
                assert!(terminal.transition(event).is_err());
            }
        }
    }

    #[test]
    fn test_determinism() {
        let state = PipelineState::AwaitingRetrieval;
        let event = StateEvent::RetrievalSucceeded;

        let result1 = state.transition(event);
        let result2 = state.transition(event);

        assert_eq!(result1.unwrap(), result2.unwrap());
    }

    #[test]
    fn test_valid_events() {
        let events = PipelineState::AwaitingRetrieval.valid_events();
        assert!(events.contains(&StateEvent::RetrievalSucceeded));
        assert!(events.contains(&StateEvent::RetrievalFailed));
        assert!(!events.contains(&StateEvent::CompositionSucceeded));
    }
}
