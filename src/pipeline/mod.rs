//! Two-stage pipeline: state machine, orchestrator, and observer seam

pub mod observer;
pub mod orchestrator;
pub mod state;

pub use observer::{NoopObserver, PipelineObserver, Stage};
pub use orchestrator::{Pipeline, RunOutcome};
pub use state::{PipelineState, StateEvent};
