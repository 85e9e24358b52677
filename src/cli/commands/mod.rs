//! Command implementations for the gradekeeper CLI
//!
//! Each command is organized into its own module.

pub mod cache;
pub mod records;
pub mod report;
pub mod version;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::config::GradekeeperConfig;
use crate::store::{self, GradeStore, StudentStore};

/// Load the seeded stores the configured records file points at
pub(crate) fn open_stores(
    config: &GradekeeperConfig,
    data_override: Option<&str>,
) -> Result<(Arc<dyn StudentStore>, Arc<dyn GradeStore>)> {
    let records_file = data_override.unwrap_or(&config.data.records_file);
    let (students, grades) = store::load_records(Path::new(records_file))?;
    Ok((Arc::new(students), Arc::new(grades)))
}
