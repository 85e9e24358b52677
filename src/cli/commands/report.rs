//! Batch report generation command

use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use crate::cache::StatCache;
use crate::cli::Output;
use crate::config::GradekeeperConfig;
use crate::export::FileExporter;
use crate::report::{
    BatchCoordinator, BatchOptions, BatchSummary, MAX_PARALLELISM, ReportWorker,
};

#[derive(Args)]
pub struct ReportArgs {
    /// Worker pool size (1-8, default from config, 0 = auto-detect)
    #[arg(short = 'j', long)]
    pub parallelism: Option<usize>,

    /// Records file to load instead of the configured one
    #[arg(long, value_name = "FILE")]
    pub data: Option<String>,
}

pub async fn execute(args: ReportArgs, config: &GradekeeperConfig, output: &Output) -> Result<()> {
    let (students, grades) = super::open_stores(config, args.data.as_deref())?;

    let records = students.find_all();
    if records.is_empty() {
        output.warning("No records found to generate reports for.");
        return Ok(());
    }

    let parallelism = resolve_parallelism(args.parallelism, config.batch.default_parallelism);
    output.info(&format!(
        "Generating reports for {} records with {} workers...",
        records.len(),
        parallelism.clamp(1, MAX_PARALLELISM).min(records.len())
    ));

    let cache = Arc::new(StatCache::new(
        config.cache.max_capacity,
        config.cache.staleness_window(),
        config.cache.warm_quota,
        students,
        grades,
    ));
    let exporter = Arc::new(FileExporter::new(
        config.reports.csv_dir.clone(),
        config.reports.json_dir.clone(),
        config.reports.binary_dir.clone(),
    ));
    let worker = Arc::new(ReportWorker::new(cache.clone(), exporter));
    let coordinator = BatchCoordinator::new(
        worker,
        BatchOptions {
            task_timeout: config.batch.task_timeout(),
            progress_interval: config.batch.progress_interval(),
            show_progress: !output.is_quiet(),
        },
    );

    let summary = coordinator.run_batch(records, parallelism)?;
    print_summary(&summary, config, cache.hit_rate(), output);

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Resolve the pool size: explicit flag beats config, 0 means auto-detect
fn resolve_parallelism(requested: Option<usize>, configured: usize) -> usize {
    let value = requested.unwrap_or(configured);
    if value == 0 {
        num_cpus::get().min(MAX_PARALLELISM)
    } else {
        value
    }
}

fn print_summary(
    summary: &BatchSummary,
    config: &GradekeeperConfig,
    hit_rate: f64,
    output: &Output,
) {
    output.header("Batch report generation complete");
    output.key_value("Total reports", &summary.total.to_string());
    output.key_value(
        "Successful",
        &format!(
            "{} ({:.1}%)",
            summary.succeeded,
            summary.succeeded as f64 * 100.0 / summary.total.max(1) as f64
        ),
    );
    output.key_value(
        "Failed",
        &format!(
            "{} ({:.1}%)",
            summary.failed,
            summary.failed as f64 * 100.0 / summary.total.max(1) as f64
        ),
    );
    output.key_value(
        "Total time",
        &format!("{:.2}s", summary.total_wall_ms as f64 / 1000.0),
    );

    if summary.succeeded > 0 {
        output.key_value(
            "Avg time per report",
            &format!("{:.1} ms", summary.average_task_ms()),
        );
        output.key_value("Min time", &format!("{} ms", summary.min_task_ms()));
        output.key_value("Max time", &format!("{} ms", summary.max_task_ms()));
        output.key_value(
            "Throughput",
            &format!("{:.1} reports/second", summary.throughput()),
        );
    }
    output.key_value("Cache hit rate", &format!("{:.1}%", hit_rate * 100.0));

    if !summary.failure_reasons.is_empty() {
        output.blank_line();
        output.warning(&format!("{} report(s) failed:", summary.failed));
        for reason in &summary.failure_reasons {
            output.list_item(reason);
        }
        if summary.failed > summary.failure_reasons.len() {
            output.list_item(&format!(
                "... and {} more",
                summary.failed - summary.failure_reasons.len()
            ));
        }
    }

    output.blank_line();
    output.info("Report locations:");
    output.key_value("CSV", &config.reports.csv_dir);
    output.key_value("JSON", &config.reports.json_dir);
    output.key_value("Binary", &config.reports.binary_dir);
}
