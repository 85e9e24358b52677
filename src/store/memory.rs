//! In-memory store implementations seeded from a JSON records file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use super::{GradeRecord, GradeStore, StudentRecord, StudentStore};

/// On-disk shape of the records file
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordsFile {
    pub students: Vec<StudentRecord>,
    pub grades: Vec<GradeRecord>,
}

/// Student store backed by an in-memory vector
pub struct InMemoryStudentStore {
    students: RwLock<Vec<StudentRecord>>,
}

impl InMemoryStudentStore {
    pub fn new(students: Vec<StudentRecord>) -> Self {
        Self {
            students: RwLock::new(students),
        }
    }
}

impl StudentStore for InMemoryStudentStore {
    fn find_all(&self) -> Vec<StudentRecord> {
        self.students.read().expect("student store lock poisoned").clone()
    }

    fn find_by_id(&self, student_id: &str) -> Option<StudentRecord> {
        self.students
            .read()
            .expect("student store lock poisoned")
            .iter()
            .find(|s| s.student_id == student_id)
            .cloned()
    }

    fn count(&self) -> usize {
        self.students.read().expect("student store lock poisoned").len()
    }
}

/// Grade store backed by a per-student index
pub struct InMemoryGradeStore {
    by_student: RwLock<HashMap<String, Vec<GradeRecord>>>,
    total: usize,
}

impl InMemoryGradeStore {
    pub fn new(grades: Vec<GradeRecord>) -> Self {
        let total = grades.len();
        let mut by_student: HashMap<String, Vec<GradeRecord>> = HashMap::new();
        for grade in grades {
            by_student
                .entry(grade.student_id.clone())
                .or_default()
                .push(grade);
        }
        Self {
            by_student: RwLock::new(by_student),
            total,
        }
    }
}

impl GradeStore for InMemoryGradeStore {
    fn grades_for(&self, student_id: &str) -> Vec<GradeRecord> {
        self.by_student
            .read()
            .expect("grade store lock poisoned")
            .get(student_id)
            .cloned()
            .unwrap_or_default()
    }

    fn average_for(&self, student_id: &str) -> f64 {
        let map = self.by_student.read().expect("grade store lock poisoned");
        match map.get(student_id) {
            Some(grades) if !grades.is_empty() => {
                let total: f64 = grades.iter().map(|g| g.grade).sum();
                total / grades.len() as f64
            }
            _ => 0.0,
        }
    }

    fn subject_count_for(&self, student_id: &str) -> usize {
        self.by_student
            .read()
            .expect("grade store lock poisoned")
            .get(student_id)
            .map_or(0, |g| g.len())
    }

    fn count(&self) -> usize {
        self.total
    }
}

/// Load both stores from a JSON records file
pub fn load_records(path: &Path) -> Result<(InMemoryStudentStore, InMemoryGradeStore)> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {}", path.display()))?;
    let file: RecordsFile = serde_json::from_str(&data)
        .with_context(|| format!("Invalid records file: {}", path.display()))?;

    tracing::debug!(
        students = file.students.len(),
        grades = file.grades.len(),
        "loaded records file"
    );

    Ok((
        InMemoryStudentStore::new(file.students),
        InMemoryGradeStore::new(file.grades),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StudentType;

    fn student(id: &str, name: &str) -> StudentRecord {
        StudentRecord {
            student_id: id.to_string(),
            name: name.to_string(),
            age: 20,
            email: format!("{}@example.com", id),
            phone: "555-0100".to_string(),
            enrollment_date: "2024-09-01".to_string(),
            status: "ACTIVE".to_string(),
            student_type: StudentType::Regular,
        }
    }

    fn grade(id: &str, subject: &str, value: f64) -> GradeRecord {
        GradeRecord {
            student_id: id.to_string(),
            subject: subject.to_string(),
            subject_type: "Core".to_string(),
            grade: value,
            date: "2025-01-15".to_string(),
        }
    }

    #[test]
    fn test_find_by_id() {
        let store = InMemoryStudentStore::new(vec![student("S001", "Ada"), student("S002", "Grace")]);
        assert_eq!(store.count(), 2);
        assert_eq!(store.find_by_id("S002").unwrap().name, "Grace");
        assert!(store.find_by_id("S999").is_none());
    }

    #[test]
    fn test_average_for() {
        let store = InMemoryGradeStore::new(vec![
            grade("S001", "Math", 80.0),
            grade("S001", "Physics", 90.0),
            grade("S002", "Math", 60.0),
        ]);
        assert_eq!(store.average_for("S001"), 85.0);
        assert_eq!(store.average_for("S002"), 60.0);
        // No grades recorded yields zero, not an error
        assert_eq!(store.average_for("S999"), 0.0);
        assert_eq!(store.subject_count_for("S001"), 2);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_load_records_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        let file = RecordsFile {
            students: vec![student("S001", "Ada")],
            grades: vec![grade("S001", "Math", 75.0)],
        };
        std::fs::write(&path, serde_json::to_string_pretty(&file).unwrap()).unwrap();

        let (students, grades) = load_records(&path).unwrap();
        assert_eq!(students.count(), 1);
        assert_eq!(grades.average_for("S001"), 75.0);
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = load_records(Path::new("/nonexistent/records.json"));
        assert!(result.is_err());
    }
}
