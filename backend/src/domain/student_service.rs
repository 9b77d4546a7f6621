//! Student use cases.
//!
//! [`StudentService`] implements both student driving ports on top of the
//! student and marks repositories. Deleting a student cascades to the marks
//! record as a second, independent write.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    MarksRepository, StudentRepository, StudentRepositoryError, StudentWithMarks,
    StudentsCommand, StudentsQuery,
};
use crate::domain::{Error, NewStudent, Student, StudentChanges, StudentId};

use super::marks_service::map_marks_repository_error;

/// Student service implementing [`StudentsCommand`] and [`StudentsQuery`].
#[derive(Clone)]
pub struct StudentService<S, M> {
    students: Arc<S>,
    marks: Arc<M>,
}

impl<S, M> StudentService<S, M> {
    /// Create a service over the given repositories.
    pub fn new(students: Arc<S>, marks: Arc<M>) -> Self {
        Self { students, marks }
    }
}

pub(crate) fn map_student_repository_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student repository error: {message}"))
        }
        StudentRepositoryError::DuplicateEmail { email } => Error::conflict("email already exists")
            .with_details(json!({
                "field": "email",
                "value": email,
                "code": "duplicate_email",
            })),
    }
}

pub(crate) fn student_not_found(id: &StudentId) -> Error {
    Error::not_found("student not found").with_details(json!({
        "studentId": id.to_string(),
        "code": "student_not_found",
    }))
}

impl<S, M> StudentService<S, M>
where
    S: StudentRepository,
    M: MarksRepository,
{
    async fn require_student(&self, id: &StudentId) -> Result<Student, Error> {
        self.students
            .find_by_id(id)
            .await
            .map_err(map_student_repository_error)?
            .ok_or_else(|| student_not_found(id))
    }

    async fn cascade_marks_delete(&self, id: &StudentId) {
        match self.marks.delete_by_student(id).await {
            Ok(removed) => debug!(student_id = %id, removed, "cascaded marks delete"),
            Err(error) => warn!(
                student_id = %id,
                error = %map_marks_repository_error(error),
                "student deleted but marks record could not be removed"
            ),
        }
    }
}

#[async_trait]
impl<S, M> StudentsCommand for StudentService<S, M>
where
    S: StudentRepository,
    M: MarksRepository,
{
    async fn create(&self, student: NewStudent) -> Result<Student, Error> {
        self.students
            .insert(&student)
            .await
            .map_err(map_student_repository_error)
    }

    async fn update(&self, id: StudentId, changes: StudentChanges) -> Result<Student, Error> {
        if changes.is_empty() {
            return self.require_student(&id).await;
        }

        self.students
            .update(&id, &changes)
            .await
            .map_err(map_student_repository_error)?
            .ok_or_else(|| student_not_found(&id))
    }

    async fn delete(&self, id: StudentId) -> Result<(), Error> {
        let removed = self
            .students
            .delete(&id)
            .await
            .map_err(map_student_repository_error)?;
        if !removed {
            return Err(student_not_found(&id));
        }

        self.cascade_marks_delete(&id).await;
        Ok(())
    }
}

#[async_trait]
impl<S, M> StudentsQuery for StudentService<S, M>
where
    S: StudentRepository,
    M: MarksRepository,
{
    async fn list(&self, page: PageRequest) -> Result<Paginated<Student>, Error> {
        let data = self
            .students
            .list(page.offset(), page.limit())
            .await
            .map_err(map_student_repository_error)?;
        let total = self
            .students
            .count()
            .await
            .map_err(map_student_repository_error)?;

        Ok(Paginated::new(data, page, total))
    }

    async fn get_with_marks(&self, id: StudentId) -> Result<StudentWithMarks, Error> {
        let student = self.require_student(&id).await?;
        let marks = self
            .marks
            .find_by_student(&id)
            .await
            .map_err(map_marks_repository_error)?
            .map(|record| record.subjects)
            .unwrap_or_default();

        Ok(StudentWithMarks { student, marks })
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
