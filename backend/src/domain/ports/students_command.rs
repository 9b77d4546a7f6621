//! Driving port for student mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewStudent, Student, StudentChanges, StudentId};

/// Create, update and delete students.
///
/// Errors use [`crate::domain::ErrorCode`]: `NotFound` for unknown ids,
/// `Conflict` for a taken email, `ServiceUnavailable` or `InternalError` for
/// storage failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsCommand: Send + Sync {
    /// Register a new student.
    async fn create(&self, student: NewStudent) -> Result<Student, Error>;

    /// Apply the fields present in `changes`. Empty changes return the
    /// current record untouched.
    async fn update(&self, id: StudentId, changes: StudentChanges) -> Result<Student, Error>;

    /// Delete a student and, best effort, its marks record.
    async fn delete(&self, id: StudentId) -> Result<(), Error>;
}
