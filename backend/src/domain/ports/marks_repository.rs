//! Driven port for marks persistence.
//!
//! A marks record is keyed by its student. The repository does not check
//! that the student exists; the marks service does that before writing.

use async_trait::async_trait;

use crate::domain::{MarksRecord, StudentId, SubjectEntry};

use super::define_port_error;

define_port_error! {
    /// Errors raised by marks repository adapters.
    pub enum MarksRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "marks repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "marks repository query failed: {message}",
    }
}

/// Storage contract for per-student marks records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarksRepository: Send + Sync {
    /// Fetch the record owned by `student_id`, if any.
    async fn find_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<MarksRecord>, MarksRepositoryError>;

    /// Append `entry` to the student's record, creating the record when
    /// absent. Returns the record after the write.
    ///
    /// Concurrent first writes for one student must still produce a single
    /// record holding both entries.
    async fn append_subject(
        &self,
        student_id: &StudentId,
        entry: &SubjectEntry,
    ) -> Result<MarksRecord, MarksRepositoryError>;

    /// Overwrite the subject list, returning `None` when no record exists.
    async fn replace_subjects(
        &self,
        student_id: &StudentId,
        subjects: &[SubjectEntry],
    ) -> Result<Option<MarksRecord>, MarksRepositoryError>;

    /// Delete the student's record, returning whether one was removed.
    async fn delete_by_student(&self, student_id: &StudentId) -> Result<bool, MarksRepositoryError>;
}
