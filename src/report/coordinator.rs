//! Batch coordination across the bounded worker pool

use anyhow::Result;
use crossbeam::channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use super::progress::{ProgressMonitor, DEFAULT_SAMPLE_INTERVAL};
use super::worker::ReportWorker;
use super::{BatchSummary, MAX_FAILURE_REASONS, WorkerOutcome};
use crate::store::StudentRecord;

/// Smallest allowed worker pool
pub const MIN_PARALLELISM: usize = 1;
/// Largest allowed worker pool; requests outside the range are clamped
pub const MAX_PARALLELISM: usize = 8;

/// Default bound on the per-task outcome wait
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables for one batch invocation
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Bounded wait for each task's outcome, in submission order
    pub task_timeout: Duration,
    /// Progress sampling cadence
    pub progress_interval: Duration,
    /// Render progress frames to stdout
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            task_timeout: DEFAULT_TASK_TIMEOUT,
            progress_interval: DEFAULT_SAMPLE_INTERVAL,
            show_progress: true,
        }
    }
}

/// One unit of submitted work; the outcome channel is the task handle
struct ReportTask {
    record: StudentRecord,
    outcome_tx: Sender<WorkerOutcome>,
}

/// Owns the worker pool for batch report generation.
///
/// One task is submitted per input record; outcomes are collected in
/// submission order with a bounded wait each, so a single stuck unit never
/// hangs the batch and a failed unit never aborts it.
pub struct BatchCoordinator {
    worker: Arc<ReportWorker>,
    options: BatchOptions,
}

impl BatchCoordinator {
    pub fn new(worker: Arc<ReportWorker>, options: BatchOptions) -> Self {
        Self { worker, options }
    }

    /// Run one batch over `records` with the requested parallelism.
    ///
    /// Parallelism outside `[1, 8]` is silently clamped. Only a pool-level
    /// failure is fatal; per-task failures and timeouts are recorded in the
    /// summary. `succeeded + failed == records.len()` on every return.
    pub fn run_batch(&self, records: Vec<StudentRecord>, parallelism: usize) -> Result<BatchSummary> {
        let total = records.len();
        if total == 0 {
            return Ok(BatchSummary::default());
        }

        let parallelism = parallelism.clamp(MIN_PARALLELISM, MAX_PARALLELISM);
        let pool_size = parallelism.min(total);
        let start = Instant::now();

        tracing::debug!(total, parallelism, pool_size, "starting batch report run");

        let outstanding = Arc::new(AtomicUsize::new(total));
        let cancelled = Arc::new(AtomicBool::new(false));

        // One bounded(1) outcome channel per task, kept in submission order
        let (work_tx, work_rx): (Sender<ReportTask>, Receiver<ReportTask>) =
            bounded(pool_size * 2);
        let mut handles: Vec<(String, Receiver<WorkerOutcome>)> = Vec::with_capacity(total);
        let mut tasks: Vec<ReportTask> = Vec::with_capacity(total);
        for record in records {
            let (outcome_tx, outcome_rx) = bounded(1);
            handles.push((record.student_id.clone(), outcome_rx));
            tasks.push(ReportTask { record, outcome_tx });
        }

        let monitor = self.options.show_progress.then(|| {
            ProgressMonitor::start(outstanding.clone(), total, self.options.progress_interval)
        });

        let scope_result = crossbeam::thread::scope(|s| {
            // Worker pool
            for _ in 0..pool_size {
                let work_rx = work_rx.clone();
                let outstanding = outstanding.clone();
                let cancelled = cancelled.clone();
                let worker = self.worker.clone();

                s.spawn(move |_| {
                    while let Ok(task) = work_rx.recv() {
                        let outcome = if cancelled.load(Ordering::Relaxed) {
                            WorkerOutcome::failed("cancelled during pool shutdown")
                        } else {
                            worker.generate(&task.record)
                        };
                        // The receiver may be gone after a wait timeout; the
                        // countdown still happens exactly once per task
                        let _ = task.outcome_tx.send(outcome);
                        outstanding.fetch_sub(1, Ordering::AcqRel);
                    }
                });
            }

            // Producer: feed the bounded work queue
            let work_tx_producer = work_tx.clone();
            s.spawn(move |_| {
                for task in tasks {
                    if work_tx_producer.send(task).is_err() {
                        break; // Workers dropped
                    }
                }
            });
            drop(work_tx);

            // Aggregation: submission order, bounded wait per handle
            let mut summary = BatchSummary {
                total,
                ..BatchSummary::default()
            };
            for (student_id, outcome_rx) in &handles {
                match outcome_rx.recv_timeout(self.options.task_timeout) {
                    Ok(outcome) if outcome.success => {
                        summary.succeeded += 1;
                        summary.per_task_ms.push(outcome.elapsed_ms);
                    }
                    Ok(outcome) => {
                        let reason = outcome
                            .error
                            .unwrap_or_else(|| "unknown failure".to_string());
                        Self::record_failure(&mut summary, student_id, &reason);
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        let reason = format!(
                            "no outcome within {}s",
                            self.options.task_timeout.as_secs()
                        );
                        Self::record_failure(&mut summary, student_id, &reason);
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        Self::record_failure(&mut summary, student_id, "worker dropped the task");
                    }
                }
            }

            // Orderly shutdown: no new work is queued, the cancel flag turns
            // any remaining queued units into immediate failures so the
            // outstanding counter still reaches zero
            cancelled.store(true, Ordering::Relaxed);
            summary
        });

        let mut summary = match scope_result {
            Ok(summary) => {
                // Confirm the monitor terminated before handing the summary back
                if let Some(monitor) = monitor {
                    monitor.wait();
                }
                summary
            }
            Err(_) => {
                if let Some(monitor) = monitor {
                    monitor.stop();
                }
                anyhow::bail!("Worker pool panicked during batch report generation");
            }
        };

        summary.total_wall_ms = start.elapsed().as_millis() as u64;
        debug_assert_eq!(summary.succeeded + summary.failed, summary.total);

        tracing::debug!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            wall_ms = summary.total_wall_ms,
            "batch report run finished"
        );
        Ok(summary)
    }

    fn record_failure(summary: &mut BatchSummary, student_id: &str, reason: &str) {
        summary.failed += 1;
        tracing::warn!(student_id = %student_id, reason = %reason, "report task failed");
        if summary.failure_reasons.len() < MAX_FAILURE_REASONS {
            summary.failure_reasons.push(format!("{}: {}", student_id, reason));
        }
    }
}
