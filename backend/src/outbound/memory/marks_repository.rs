//! In-process marks store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{MarksRepository, MarksRepositoryError};
use crate::domain::{MarksRecord, StudentId, SubjectEntry};

/// `MarksRepository` keyed by student.
#[derive(Clone)]
pub struct InMemoryMarksRepository {
    records: Arc<Mutex<HashMap<StudentId, MarksRecord>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryMarksRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<StudentId, MarksRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MarksRepository for InMemoryMarksRepository {
    async fn find_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<MarksRecord>, MarksRepositoryError> {
        Ok(self.lock().get(student_id).cloned())
    }

    async fn append_subject(
        &self,
        student_id: &StudentId,
        entry: &SubjectEntry,
    ) -> Result<MarksRecord, MarksRepositoryError> {
        let now = self.clock.utc();
        let mut records = self.lock();
        let record = records
            .entry(*student_id)
            .and_modify(|record| record.updated_at = now)
            .or_insert_with(|| MarksRecord {
                id: Uuid::new_v4(),
                student_id: *student_id,
                subjects: Vec::new(),
                created_at: now,
                updated_at: now,
            });
        record.subjects.push(entry.clone());
        Ok(record.clone())
    }

    async fn replace_subjects(
        &self,
        student_id: &StudentId,
        subjects: &[SubjectEntry],
    ) -> Result<Option<MarksRecord>, MarksRepositoryError> {
        let now = self.clock.utc();
        let mut records = self.lock();
        Ok(records.get_mut(student_id).map(|record| {
            record.subjects = subjects.to_vec();
            record.updated_at = now;
            record.clone()
        }))
    }

    async fn delete_by_student(&self, student_id: &StudentId) -> Result<bool, MarksRepositoryError> {
        Ok(self.lock().remove(student_id).is_some())
    }
}
