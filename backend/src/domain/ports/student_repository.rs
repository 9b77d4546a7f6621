//! Driven port for student persistence.

use async_trait::async_trait;

use crate::domain::{NewStudent, Student, StudentChanges, StudentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "student repository query failed: {message}",
        /// The email is already held by another student.
        DuplicateEmail { email: String } =>
            "email already registered: {email}",
    }
}

/// Storage contract for students.
///
/// Adapters own timestamps: `created_at` and `updated_at` are set on insert
/// and `updated_at` is refreshed on every update. Email uniqueness is the
/// adapter's responsibility and surfaces as
/// [`StudentRepositoryError::DuplicateEmail`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Persist a new student and return the stored record.
    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentRepositoryError>;

    /// Fetch one page of students in storage order.
    async fn list(&self, offset: u64, limit: u32) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Count every stored student.
    async fn count(&self) -> Result<u64, StudentRepositoryError>;

    /// Look up a student by identifier.
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError>;

    /// Apply a partial update, returning `None` when the student is absent.
    ///
    /// Callers pass non-empty changes; empty changes may still refresh
    /// `updated_at`.
    async fn update(
        &self,
        id: &StudentId,
        changes: &StudentChanges,
    ) -> Result<Option<Student>, StudentRepositoryError>;

    /// Delete a student, returning whether a row was removed.
    async fn delete(&self, id: &StudentId) -> Result<bool, StudentRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn duplicate_email_error_names_the_address() {
        let error = StudentRepositoryError::duplicate_email("a@x.com");
        assert_eq!(error.to_string(), "email already registered: a@x.com");
    }

    #[rstest]
    fn connection_error_formats_message() {
        let error = StudentRepositoryError::connection("pool timed out");
        assert!(error.to_string().contains("pool timed out"));
    }
}
