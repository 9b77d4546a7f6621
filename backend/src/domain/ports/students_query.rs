//! Driving port for student reads.

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Student, StudentId, SubjectEntry};

/// A student together with the subjects recorded for them.
///
/// `marks` is empty when the student has no marks record yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithMarks {
    /// The student.
    pub student: Student,
    /// Recorded subjects in insertion order.
    pub marks: Vec<SubjectEntry>,
}

/// Read-side use cases for students.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsQuery: Send + Sync {
    /// List one page of students with the overall total.
    async fn list(&self, page: PageRequest) -> Result<Paginated<Student>, Error>;

    /// Fetch a student with their subjects, or `NotFound`.
    async fn get_with_marks(&self, id: StudentId) -> Result<StudentWithMarks, Error>;
}
