//! One unit of report work

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;

use super::WorkerOutcome;
use crate::cache::StatCache;
use crate::export::{Exporter, ReportStats};
use crate::store::StudentRecord;

/// Generates the full report set for a single record.
///
/// Statistics are read through the access cache; the three export formats run
/// in sequence. Any failing step marks the whole unit failed with that
/// failure's message, no per-format outcome is tracked.
pub struct ReportWorker {
    cache: Arc<StatCache>,
    exporter: Arc<dyn Exporter>,
}

impl ReportWorker {
    pub fn new(cache: Arc<StatCache>, exporter: Arc<dyn Exporter>) -> Self {
        Self { cache, exporter }
    }

    /// Produce exactly one outcome for `record`
    pub fn generate(&self, record: &StudentRecord) -> WorkerOutcome {
        let start = Instant::now();
        match self.try_generate(record) {
            Ok(()) => WorkerOutcome::succeeded(start.elapsed().as_millis() as u64),
            Err(e) => {
                tracing::warn!(
                    student_id = %record.student_id,
                    error = %e,
                    "report generation failed"
                );
                WorkerOutcome::failed(format!("{:#}", e))
            }
        }
    }

    fn try_generate(&self, record: &StudentRecord) -> Result<()> {
        let average = self.cache.average(&record.student_id)?;
        let grades = self.cache.grades(&record.student_id)?;
        let stats = ReportStats { average, grades };

        self.exporter.export_csv(record, &stats)?;
        self.exporter.export_json(record, &stats)?;
        self.exporter.export_binary(record, &stats)?;
        Ok(())
    }
}
