//! Marks use cases.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    AddSubjectRequest, MarksCommand, MarksQuery, MarksRepository, MarksRepositoryError,
    StudentRepository,
};
use crate::domain::{Error, MarksRecord, StudentId, SubjectEntry, SubjectName};

use super::student_service::{map_student_repository_error, student_not_found};

/// Marks service implementing [`MarksCommand`] and [`MarksQuery`].
#[derive(Clone)]
pub struct MarksService<M, S> {
    marks: Arc<M>,
    students: Arc<S>,
}

impl<M, S> MarksService<M, S> {
    /// Create a service over the given repositories.
    pub fn new(marks: Arc<M>, students: Arc<S>) -> Self {
        Self { marks, students }
    }
}

pub(crate) fn map_marks_repository_error(error: MarksRepositoryError) -> Error {
    match error {
        MarksRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("marks repository unavailable: {message}"))
        }
        MarksRepositoryError::Query { message } => {
            Error::internal(format!("marks repository error: {message}"))
        }
    }
}

fn marks_record_not_found(student_id: &StudentId) -> Error {
    Error::not_found("marks record not found").with_details(json!({
        "studentId": student_id.to_string(),
        "code": "marks_record_not_found",
    }))
}

fn subject_not_found(student_id: &StudentId, subject: &SubjectName) -> Error {
    Error::not_found("subject not found").with_details(json!({
        "studentId": student_id.to_string(),
        "subject": subject.as_ref(),
        "code": "subject_not_found",
    }))
}

impl<M, S> MarksService<M, S>
where
    M: MarksRepository,
    S: StudentRepository,
{
    async fn find_record(&self, student_id: &StudentId) -> Result<Option<MarksRecord>, Error> {
        self.marks
            .find_by_student(student_id)
            .await
            .map_err(map_marks_repository_error)
    }
}

#[async_trait]
impl<M, S> MarksCommand for MarksService<M, S>
where
    M: MarksRepository,
    S: StudentRepository,
{
    async fn add_subject(&self, request: AddSubjectRequest) -> Result<MarksRecord, Error> {
        let AddSubjectRequest { student_id, entry } = request;
        let exists = self
            .students
            .find_by_id(&student_id)
            .await
            .map_err(map_student_repository_error)?
            .is_some();
        if !exists {
            return Err(student_not_found(&student_id));
        }

        self.marks
            .append_subject(&student_id, &entry)
            .await
            .map_err(map_marks_repository_error)
    }

    async fn remove_subject(
        &self,
        student_id: StudentId,
        subject: SubjectName,
    ) -> Result<Vec<SubjectEntry>, Error> {
        let mut record = self
            .find_record(&student_id)
            .await?
            .ok_or_else(|| marks_record_not_found(&student_id))?;

        if record.remove_subject(&subject) == 0 {
            return Err(subject_not_found(&student_id, &subject));
        }

        let updated = self
            .marks
            .replace_subjects(&student_id, &record.subjects)
            .await
            .map_err(map_marks_repository_error)?
            .ok_or_else(|| marks_record_not_found(&student_id))?;
        Ok(updated.subjects)
    }
}

#[async_trait]
impl<M, S> MarksQuery for MarksService<M, S>
where
    M: MarksRepository,
    S: StudentRepository,
{
    async fn list_subjects(&self, student_id: StudentId) -> Result<Vec<SubjectEntry>, Error> {
        Ok(self
            .find_record(&student_id)
            .await?
            .map(|record| record.subjects)
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "marks_service_tests.rs"]
mod tests;
