//! Access cache for record and statistic lookups
//!
//! Every read path consults the cache before falling back to the backing
//! stores. `core` holds the bounded eviction-managed map; `StatCache` wires it
//! to the record stores with the key scheme the rest of the tool uses.

pub mod core;

pub use self::core::{AccessCache, CacheStats, DEFAULT_MAX_CAPACITY, DEFAULT_STALENESS_WINDOW};

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::store::{GradeRecord, GradeStore, StudentRecord, StudentStore};

/// Value stored in the shared cache, one variant per key family
#[derive(Debug, Clone)]
pub enum CachedValue {
    Student(StudentRecord),
    Grades(Vec<GradeRecord>),
    Average(f64),
}

/// Cache-backed read access to students, grades and derived averages.
///
/// Keys are namespaced per family (`student_`, `grades_`, `avg_`) so one
/// bounded cache serves all three lookup paths.
pub struct StatCache {
    cache: AccessCache<CachedValue>,
    students: Arc<dyn StudentStore>,
    grades: Arc<dyn GradeStore>,
    warm_quota: usize,
}

impl StatCache {
    pub fn new(
        max_capacity: usize,
        staleness_window: Duration,
        warm_quota: usize,
        students: Arc<dyn StudentStore>,
        grades: Arc<dyn GradeStore>,
    ) -> Self {
        let stat_cache = Self {
            cache: AccessCache::new(max_capacity, staleness_window),
            students,
            grades,
            warm_quota,
        };
        stat_cache.warm();
        stat_cache
    }

    /// Cached student lookup, falling back to the student store
    pub fn student(&self, student_id: &str) -> Result<Option<StudentRecord>> {
        let key = format!("student_{}", student_id);
        let students = &self.students;
        let value = self.cache.get_with(&key, || {
            Ok(students.find_by_id(student_id).map(CachedValue::Student))
        })?;
        Ok(match value {
            Some(CachedValue::Student(record)) => Some(record),
            _ => None,
        })
    }

    /// Cached grade list for a student; empty lists are returned but not cached
    pub fn grades(&self, student_id: &str) -> Result<Vec<GradeRecord>> {
        let key = format!("grades_{}", student_id);
        let grades = &self.grades;
        let value = self.cache.get_with(&key, || {
            let list = grades.grades_for(student_id);
            Ok(if list.is_empty() {
                None
            } else {
                Some(CachedValue::Grades(list))
            })
        })?;
        Ok(match value {
            Some(CachedValue::Grades(list)) => list,
            _ => Vec::new(),
        })
    }

    /// Cached average for a student; zero averages are returned but not cached
    pub fn average(&self, student_id: &str) -> Result<f64> {
        let key = format!("avg_{}", student_id);
        let grades = &self.grades;
        let value = self.cache.get_with(&key, || {
            let average = grades.average_for(student_id);
            Ok(if average > 0.0 {
                Some(CachedValue::Average(average))
            } else {
                None
            })
        })?;
        Ok(match value {
            Some(CachedValue::Average(average)) => average,
            _ => 0.0,
        })
    }

    /// Pre-load the warm quota of students straight from the store, bypassing
    /// the loader/miss-counting path
    pub fn warm(&self) {
        for student in self.students.find_all().into_iter().take(self.warm_quota) {
            let key = format!("student_{}", student.student_id);
            self.cache.prime(&key, CachedValue::Student(student));
        }
    }

    /// Sweep stale entries, then re-warm the hot set
    pub fn refresh(&self) -> usize {
        let removed = self.cache.purge_stale();
        self.warm();
        removed
    }

    pub fn hit_rate(&self) -> f64 {
        self.cache.hit_rate()
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn max_capacity(&self) -> usize {
        self.cache.max_capacity()
    }

    pub fn mean_access_count(&self) -> f64 {
        self.cache.mean_access_count()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}
