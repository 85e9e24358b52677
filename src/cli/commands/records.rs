//! Record listing command

use anyhow::Result;

use crate::cache::StatCache;
use crate::cli::{Output, RecordsCommands};
use crate::config::GradekeeperConfig;

pub async fn execute(
    cmd: RecordsCommands,
    config: &GradekeeperConfig,
    output: &Output,
) -> Result<()> {
    match cmd {
        RecordsCommands::List => list(config, output),
    }
}

fn list(config: &GradekeeperConfig, output: &Output) -> Result<()> {
    let (students, grades) = super::open_stores(config, None)?;
    let records = students.find_all();
    if records.is_empty() {
        output.warning("No records loaded.");
        return Ok(());
    }

    let grade_index = grades.clone();
    let cache = StatCache::new(
        config.cache.max_capacity,
        config.cache.staleness_window(),
        config.cache.warm_quota,
        students,
        grades,
    );

    output.header(&format!(
        "Records ({} students, {} grades)",
        records.len(),
        grade_index.count()
    ));
    println!(
        "{:<8} {:<24} {:<8} {:>8} {:>9}  {}",
        "ID", "Name", "Type", "Average", "Subjects", "Status"
    );
    output.separator();
    for record in &records {
        let average = cache.average(&record.student_id)?;
        let status = if average >= record.passing_grade() {
            "PASSING"
        } else {
            "FAILING"
        };
        println!(
            "{:<8} {:<24} {:<8} {:>7.1}% {:>9}  {}",
            record.student_id,
            record.name,
            record.student_type.as_str(),
            average,
            grade_index.subject_count_for(&record.student_id),
            status
        );
    }
    Ok(())
}
