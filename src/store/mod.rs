//! Record store for gradekeeper
//!
//! Defines the student/grade data types and the store traits the rest of the
//! tool reads through. The in-memory implementations live in `memory.rs`.

pub mod memory;

pub use memory::{InMemoryGradeStore, InMemoryStudentStore, load_records};

use serde::{Deserialize, Serialize};

/// Category a student is enrolled under, determines the passing threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentType {
    Regular,
    Honors,
}

impl StudentType {
    /// Minimum average required to be considered passing
    pub fn passing_grade(&self) -> f64 {
        match self {
            StudentType::Regular => 50.0,
            StudentType::Honors => 60.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentType::Regular => "Regular",
            StudentType::Honors => "Honors",
        }
    }
}

/// One student record, immutable for the duration of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub name: String,
    pub age: u32,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub enrollment_date: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub student_type: StudentType,
}

fn default_status() -> String {
    "ACTIVE".to_string()
}

impl StudentRecord {
    pub fn passing_grade(&self) -> f64 {
        self.student_type.passing_grade()
    }
}

/// One recorded grade for a student in a subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRecord {
    pub student_id: String,
    pub subject: String,
    pub subject_type: String,
    pub grade: f64,
    #[serde(default)]
    pub date: String,
}

/// Read access to student records
pub trait StudentStore: Send + Sync {
    fn find_all(&self) -> Vec<StudentRecord>;
    fn find_by_id(&self, student_id: &str) -> Option<StudentRecord>;
    fn count(&self) -> usize;
}

/// Read access to grades and derived statistics
pub trait GradeStore: Send + Sync {
    fn grades_for(&self, student_id: &str) -> Vec<GradeRecord>;

    /// Mean of all grades for the student, 0.0 when no grades are recorded
    fn average_for(&self, student_id: &str) -> f64;

    fn subject_count_for(&self, student_id: &str) -> usize;
    fn count(&self) -> usize;
}
