//! Driving port for marks mutations.

use async_trait::async_trait;

use crate::domain::{Error, MarksRecord, StudentId, SubjectEntry, SubjectName};

/// Request to record a subject score for a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSubjectRequest {
    /// Student receiving the score.
    pub student_id: StudentId,
    /// Subject and score to append.
    pub entry: SubjectEntry,
}

/// Add and remove subject entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarksCommand: Send + Sync {
    /// Append a subject entry, creating the marks record on first use.
    ///
    /// Fails with `NotFound` when the student does not exist. Repeated
    /// subjects are appended, not merged.
    async fn add_subject(&self, request: AddSubjectRequest) -> Result<MarksRecord, Error>;

    /// Remove every entry matching `subject` case-insensitively and return
    /// the entries that remain.
    ///
    /// Fails with `NotFound` when the student has no marks record or when no
    /// entry matched; the two cases carry different detail codes.
    async fn remove_subject(
        &self,
        student_id: StudentId,
        subject: SubjectName,
    ) -> Result<Vec<SubjectEntry>, Error>;
}
