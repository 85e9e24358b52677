//! Concurrent batch report engine
//!
//! `BatchCoordinator` fans one `ReportWorker` unit per record out across a
//! bounded worker pool, tracks per-unit success and failure independently,
//! and aggregates timing into a `BatchSummary` while a `ProgressMonitor`
//! renders live progress from a shared outstanding counter.

pub mod coordinator;
pub mod progress;
pub mod worker;

pub use coordinator::{BatchCoordinator, BatchOptions, MAX_PARALLELISM};
pub use progress::ProgressMonitor;
pub use worker::ReportWorker;

/// Upper bound on the failure reasons kept in a summary
pub const MAX_FAILURE_REASONS: usize = 10;

/// Outcome of one report unit
#[derive(Debug, Clone)]
pub struct WorkerOutcome {
    pub success: bool,
    /// Unit duration, meaningful only on success
    pub elapsed_ms: u64,
    pub error: Option<String>,
}

impl WorkerOutcome {
    pub fn succeeded(elapsed_ms: u64) -> Self {
        Self {
            success: true,
            elapsed_ms,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            elapsed_ms: 0,
            error: Some(error.into()),
        }
    }
}

/// Aggregated result of one batch invocation, immutable once returned.
///
/// `succeeded + failed == total` holds for every return path; no task outcome
/// is ever dropped.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Wall-clock duration of the whole batch, not the sum of per-task times
    pub total_wall_ms: u64,
    /// Durations of the successful units, in collection order
    pub per_task_ms: Vec<u64>,
    /// Up to [`MAX_FAILURE_REASONS`] diagnostic messages; `failed` holds the
    /// full count
    pub failure_reasons: Vec<String>,
}

impl BatchSummary {
    pub fn average_task_ms(&self) -> f64 {
        if self.per_task_ms.is_empty() {
            return 0.0;
        }
        self.per_task_ms.iter().sum::<u64>() as f64 / self.per_task_ms.len() as f64
    }

    pub fn min_task_ms(&self) -> u64 {
        self.per_task_ms.iter().copied().min().unwrap_or(0)
    }

    pub fn max_task_ms(&self) -> u64 {
        self.per_task_ms.iter().copied().max().unwrap_or(0)
    }

    /// Successful reports per second over the batch wall time
    pub fn throughput(&self) -> f64 {
        if self.total_wall_ms == 0 {
            return 0.0;
        }
        self.succeeded as f64 * 1000.0 / self.total_wall_ms as f64
    }
}
