//! Driving port for marks reads.

use async_trait::async_trait;

use crate::domain::{Error, StudentId, SubjectEntry};

/// Read-side use cases for marks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarksQuery: Send + Sync {
    /// Subjects recorded for the student; empty when no record exists.
    async fn list_subjects(&self, student_id: StudentId) -> Result<Vec<SubjectEntry>, Error>;
}
