//! File-backed exporter writing CSV, JSON and binary reports

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::{Exporter, ReportStats, letter_grade, percentage_to_gpa};
use crate::store::StudentRecord;

/// Exporter writing `<id>_report.csv/.json/.dat` into per-format directories
pub struct FileExporter {
    csv_dir: PathBuf,
    json_dir: PathBuf,
    binary_dir: PathBuf,
}

/// Payload of the binary report file
#[derive(Debug, Serialize, Deserialize)]
struct BinaryReport {
    student: StudentRecord,
    average: f64,
    grades: Vec<crate::store::GradeRecord>,
    generated_at: String,
}

impl FileExporter {
    pub fn new(csv_dir: impl Into<PathBuf>, json_dir: impl Into<PathBuf>, binary_dir: impl Into<PathBuf>) -> Self {
        Self {
            csv_dir: csv_dir.into(),
            json_dir: json_dir.into(),
            binary_dir: binary_dir.into(),
        }
    }

    pub fn csv_dir(&self) -> &Path {
        &self.csv_dir
    }

    pub fn json_dir(&self) -> &Path {
        &self.json_dir
    }

    pub fn binary_dir(&self) -> &Path {
        &self.binary_dir
    }

    fn report_path(dir: &Path, record: &StudentRecord, extension: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;
        Ok(dir.join(format!("{}_report.{}", record.student_id, extension)))
    }

    fn passing_status(record: &StudentRecord, average: f64) -> &'static str {
        if average >= record.passing_grade() {
            "PASSING"
        } else {
            "FAILING"
        }
    }
}

impl Exporter for FileExporter {
    fn export_csv(&self, record: &StudentRecord, stats: &ReportStats) -> Result<()> {
        let path = Self::report_path(&self.csv_dir, record, "csv")?;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "Student Report - Generated: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(out, "{}", "=".repeat(50));
        let _ = writeln!(out, "Student ID,{}", record.student_id);
        let _ = writeln!(out, "Name,{}", record.name);
        let _ = writeln!(out, "Type,{}", record.student_type.as_str());
        let _ = writeln!(out, "Email,{}", record.email);
        let _ = writeln!(out, "Phone,{}", record.phone);
        let _ = writeln!(out, "Status,{}", record.status);
        let _ = writeln!(out, "Average Grade,{:.2}%", stats.average);
        let _ = writeln!(out, "GPA,{:.2}", percentage_to_gpa(stats.average));
        let _ = writeln!(out);
        let _ = writeln!(out, "GRADE DETAILS");
        let _ = writeln!(out, "Subject,Type,Grade,Letter Grade,Date");
        for grade in &stats.grades {
            let _ = writeln!(
                out,
                "{},{},{:.2},{},{}",
                grade.subject,
                grade.subject_type,
                grade.grade,
                letter_grade(grade.grade),
                grade.date
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "STATISTICS");
        let _ = writeln!(out, "Total Subjects,{}", stats.subject_count());
        let _ = writeln!(out, "Status,{}", Self::passing_status(record, stats.average));

        std::fs::write(&path, out)
            .with_context(|| format!("Failed to write CSV report: {}", path.display()))
    }

    fn export_json(&self, record: &StudentRecord, stats: &ReportStats) -> Result<()> {
        let path = Self::report_path(&self.json_dir, record, "json")?;

        let grades: Vec<_> = stats
            .grades
            .iter()
            .map(|grade| {
                json!({
                    "subject": grade.subject,
                    "subjectType": grade.subject_type,
                    "grade": grade.grade,
                    "letterGrade": letter_grade(grade.grade),
                    "date": grade.date,
                })
            })
            .collect();

        let report = json!({
            "reportId": uuid::Uuid::new_v4().to_string(),
            "generationDate": chrono::Local::now().to_rfc3339(),
            "studentId": record.student_id,
            "name": record.name,
            "type": record.student_type.as_str(),
            "email": record.email,
            "phone": record.phone,
            "status": record.status,
            "averageGrade": stats.average,
            "gpa": percentage_to_gpa(stats.average),
            "passingStatus": Self::passing_status(record, stats.average),
            "grades": grades,
        });

        std::fs::write(&path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("Failed to write JSON report: {}", path.display()))
    }

    fn export_binary(&self, record: &StudentRecord, stats: &ReportStats) -> Result<()> {
        let path = Self::report_path(&self.binary_dir, record, "dat")?;

        let report = BinaryReport {
            student: record.clone(),
            average: stats.average,
            grades: stats.grades.clone(),
            generated_at: chrono::Local::now().to_rfc3339(),
        };
        let encoded = bincode::serde::encode_to_vec(&report, bincode::config::standard())
            .context("Failed to encode binary report")?;

        std::fs::write(&path, encoded)
            .with_context(|| format!("Failed to write binary report: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{GradeRecord, StudentType};
    use tempfile::TempDir;

    fn record() -> StudentRecord {
        StudentRecord {
            student_id: "S042".to_string(),
            name: "Ada Lovelace".to_string(),
            age: 21,
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            enrollment_date: "2024-09-01".to_string(),
            status: "ACTIVE".to_string(),
            student_type: StudentType::Honors,
        }
    }

    fn stats() -> ReportStats {
        ReportStats {
            average: 88.5,
            grades: vec![GradeRecord {
                student_id: "S042".to_string(),
                subject: "Math".to_string(),
                subject_type: "Core".to_string(),
                grade: 88.5,
                date: "2025-01-15".to_string(),
            }],
        }
    }

    fn exporter(dir: &TempDir) -> FileExporter {
        FileExporter::new(
            dir.path().join("csv"),
            dir.path().join("json"),
            dir.path().join("binary"),
        )
    }

    #[test]
    fn test_export_csv_layout() {
        let dir = TempDir::new().unwrap();
        exporter(&dir).export_csv(&record(), &stats()).unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("csv").join("S042_report.csv")).unwrap();
        assert!(content.contains("Student ID,S042"));
        assert!(content.contains("Average Grade,88.50%"));
        assert!(content.contains("GRADE DETAILS"));
        assert!(content.contains("Math,Core,88.50,B+,2025-01-15"));
        assert!(content.contains("Status,PASSING"));
    }

    #[test]
    fn test_export_json_fields() {
        let dir = TempDir::new().unwrap();
        exporter(&dir).export_json(&record(), &stats()).unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("json").join("S042_report.json")).unwrap();
        let report: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(report["studentId"], "S042");
        assert_eq!(report["passingStatus"], "PASSING");
        assert_eq!(report["grades"][0]["letterGrade"], "B+");
        assert!(report["reportId"].as_str().is_some());
    }

    #[test]
    fn test_export_binary_roundtrip() {
        let dir = TempDir::new().unwrap();
        exporter(&dir).export_binary(&record(), &stats()).unwrap();

        let bytes = std::fs::read(dir.path().join("binary").join("S042_report.dat")).unwrap();
        let (decoded, _): (BinaryReport, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard()).unwrap();
        assert_eq!(decoded.student.student_id, "S042");
        assert_eq!(decoded.average, 88.5);
        assert_eq!(decoded.grades.len(), 1);
    }

    #[test]
    fn test_export_fails_on_unwritable_directory() {
        let exporter = FileExporter::new(
            "/dev/null/csv", // not a directory, create_dir_all fails
            "/dev/null/json",
            "/dev/null/binary",
        );
        assert!(exporter.export_csv(&record(), &stats()).is_err());
    }
}
