//! Integration tests for the gradekeeper CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Write a records file with `count` students, one grade each
fn seed_records(dir: &Path, count: usize) {
    let students: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "student_id": format!("S{:03}", i),
                "name": format!("Student {}", i),
                "age": 20,
                "email": format!("s{}@example.com", i),
                "phone": "555-0100",
                "enrollment_date": "2024-09-01",
                "status": "ACTIVE",
                "student_type": if i % 2 == 0 { "honors" } else { "regular" }
            })
        })
        .collect();
    let grades: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "student_id": format!("S{:03}", i),
                "subject": "Mathematics",
                "subject_type": "Core",
                "grade": 70.0 + (i % 20) as f64,
                "date": "2025-01-15"
            })
        })
        .collect();
    let file = serde_json::json!({ "students": students, "grades": grades });
    std::fs::write(
        dir.join("records.json"),
        serde_json::to_string_pretty(&file).unwrap(),
    )
    .unwrap();
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("gradekeeper").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("batch report engine"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("gradekeeper").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gradekeeper"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    let mut cmd = Command::cargo_bin("gradekeeper").unwrap();
    cmd.arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test record listing over a seeded file
#[test]
fn test_records_list() {
    let temp_dir = TempDir::new().unwrap();
    seed_records(temp_dir.path(), 3);

    let mut cmd = Command::cargo_bin("gradekeeper").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("records")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("S001"))
        .stdout(predicate::str::contains("Student 3"))
        .stdout(predicate::str::contains("PASSING"));
}

/// Test a missing records file is a clean error
#[test]
fn test_records_list_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("gradekeeper").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("records")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("records.json"));
}

/// Test the full batch report run end to end
#[test]
fn test_report_batch_generates_all_formats() {
    let temp_dir = TempDir::new().unwrap();
    seed_records(temp_dir.path(), 10);

    let mut cmd = Command::cargo_bin("gradekeeper").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("report")
        .arg("-j")
        .arg("4")
        .assert()
        .success()
        .stdout(predicate::str::contains("10 (100.0%)"))
        .stdout(predicate::str::contains("0 (0.0%)"));

    // One file per record per format, named from the record identity
    for i in 1..=10 {
        let id = format!("S{:03}", i);
        assert!(
            temp_dir
                .path()
                .join("reports/csv")
                .join(format!("{}_report.csv", id))
                .exists(),
            "missing CSV report for {}",
            id
        );
        assert!(
            temp_dir
                .path()
                .join("reports/json")
                .join(format!("{}_report.json", id))
                .exists(),
            "missing JSON report for {}",
            id
        );
        assert!(
            temp_dir
                .path()
                .join("reports/binary")
                .join(format!("{}_report.dat", id))
                .exists(),
            "missing binary report for {}",
            id
        );
    }
}

/// Test report run with an explicit data file override
#[test]
fn test_report_with_data_override() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = TempDir::new().unwrap();
    seed_records(data_dir.path(), 2);
    let data_file = data_dir.path().join("records.json");

    let mut cmd = Command::cargo_bin("gradekeeper").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("report")
        .arg("--data")
        .arg(&data_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 (100.0%)"));
}

/// Test report over an empty record set warns instead of failing
#[test]
fn test_report_empty_records() {
    let temp_dir = TempDir::new().unwrap();
    seed_records(temp_dir.path(), 0);

    let mut cmd = Command::cargo_bin("gradekeeper").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found"));
}

/// Test cache statistics command
#[test]
fn test_cache_stats() {
    let temp_dir = TempDir::new().unwrap();
    seed_records(temp_dir.path(), 5);

    let mut cmd = Command::cargo_bin("gradekeeper").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("cache")
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hit rate"))
        // All five records fit inside the default warm quota
        .stdout(predicate::str::contains("5 / 150"));
}

/// Test configuration file overrides are honored
#[test]
fn test_config_override() {
    let temp_dir = TempDir::new().unwrap();
    seed_records(temp_dir.path(), 5);
    std::fs::write(
        temp_dir.path().join("gradekeeper.toml"),
        "[cache]\nmax_capacity = 42\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("gradekeeper").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("cache")
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 / 42"));
}
