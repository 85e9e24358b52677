//! Multi-format report export
//!
//! One report per record per format, named deterministically from the record
//! identity and written into format-specific directories. The batch engine
//! only depends on the `Exporter` trait; `FileExporter` is the file-backed
//! implementation.

pub mod file;

pub use file::FileExporter;

use anyhow::Result;

use crate::store::{GradeRecord, StudentRecord};

/// Derived statistics handed to the exporter alongside the record
#[derive(Debug, Clone)]
pub struct ReportStats {
    pub average: f64,
    pub grades: Vec<GradeRecord>,
}

impl ReportStats {
    pub fn subject_count(&self) -> usize {
        self.grades.len()
    }
}

/// Synchronous export of one record into each supported format.
/// Implementations raise a distinguishable error on I/O failure.
pub trait Exporter: Send + Sync {
    fn export_csv(&self, record: &StudentRecord, stats: &ReportStats) -> Result<()>;
    fn export_json(&self, record: &StudentRecord, stats: &ReportStats) -> Result<()>;
    fn export_binary(&self, record: &StudentRecord, stats: &ReportStats) -> Result<()>;
}

/// Letter grade for a percentage score
pub fn letter_grade(grade: f64) -> &'static str {
    if grade >= 97.0 {
        "A+"
    } else if grade >= 93.0 {
        "A"
    } else if grade >= 90.0 {
        "A-"
    } else if grade >= 87.0 {
        "B+"
    } else if grade >= 83.0 {
        "B"
    } else if grade >= 80.0 {
        "B-"
    } else if grade >= 77.0 {
        "C+"
    } else if grade >= 73.0 {
        "C"
    } else if grade >= 70.0 {
        "C-"
    } else if grade >= 67.0 {
        "D+"
    } else if grade >= 60.0 {
        "D"
    } else {
        "F"
    }
}

/// Four-point GPA for a percentage score
pub fn percentage_to_gpa(percentage: f64) -> f64 {
    if percentage >= 93.0 {
        4.0
    } else if percentage >= 90.0 {
        3.7
    } else if percentage >= 87.0 {
        3.3
    } else if percentage >= 83.0 {
        3.0
    } else if percentage >= 80.0 {
        2.7
    } else if percentage >= 77.0 {
        2.3
    } else if percentage >= 73.0 {
        2.0
    } else if percentage >= 70.0 {
        1.7
    } else if percentage >= 67.0 {
        1.3
    } else if percentage >= 65.0 {
        1.0
    } else {
        0.0
    }
}
