//! Run telemetry
//!
//! In-process event collection for pipeline runs. The collector implements
//! [`PipelineObserver`] and is handed to the orchestrator per run; nothing
//! here is process-global.

use crate::pipeline::{PipelineObserver, PipelineState, Stage};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use uuid::Uuid;

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    RunStarted {
        run_id: Uuid,
        query: String,
        timestamp: Instant,
    },
    StageStarted {
        run_id: Uuid,
        stage: Stage,
        timestamp: Instant,
    },
    StageCompleted {
        run_id: Uuid,
        stage: Stage,
        success: bool,
        timestamp: Instant,
    },
    StateTransition {
        run_id: Uuid,
        from: PipelineState,
        to: PipelineState,
        timestamp: Instant,
    },
}

/// Telemetry statistics
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub runs_started: usize,
    pub stages_completed: usize,
    pub stages_failed: usize,
    pub state_transitions: usize,
}

/// Telemetry collector
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        {
            let mut stats = self.stats.lock().unwrap();
            match &event {
                TelemetryEvent::RunStarted { .. } => {
                    stats.runs_started += 1;
                }
                TelemetryEvent::StageCompleted { success, .. } => {
                    if *success {
                        stats.stages_completed += 1;
                    } else {
                        stats.stages_failed += 1;
                    }
                }
                TelemetryEvent::StateTransition { .. } => {
                    stats.state_transitions += 1;
                }
                TelemetryEvent::StageStarted { .. } => {}
            }
        }

        self.events.lock().unwrap().push(event);
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        self.stats.lock().unwrap().clone()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        let events = self.events.lock().unwrap();
        let start = events.len().saturating_sub(n);
        events[start..].to_vec()
    }

    /// One-line run summary for verbose output
    pub fn summary(&self) -> String {
        let stats = self.get_stats();
        format!(
            "runs: {} | stages ok: {} | stages failed: {} | transitions: {} | elapsed: {:?}",
            stats.runs_started,
            stats.stages_completed,
            stats.stages_failed,
            stats.state_transitions,
            self.elapsed()
        )
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineObserver for TelemetryCollector {
    fn on_run_started(&self, run_id: Uuid, query: &str) {
        self.record(TelemetryEvent::RunStarted {
            run_id,
            query: query.to_string(),
            timestamp: Instant::now(),
        });
    }

    fn on_stage_started(&self, run_id: Uuid, stage: Stage) {
        self.record(TelemetryEvent::StageStarted {
            run_id,
            stage,
            timestamp: Instant::now(),
        });
    }

    fn on_stage_completed(&self, run_id: Uuid, stage: Stage, success: bool) {
        self.record(TelemetryEvent::StageCompleted {
            run_id,
            stage,
            success,
            timestamp: Instant::now(),
        });
    }

    fn on_transition(&self, run_id: Uuid, from: PipelineState, to: PipelineState) {
        self.record(TelemetryEvent::StateTransition {
            run_id,
            from,
            to,
            timestamp: Instant::now(),
        });
    }
}
