//! Tests for the marks service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockMarksRepository, MockStudentRepository};
use crate::domain::{Age, EmailAddress, ErrorCode, Marks, Student, StudentName};
use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

fn make_service(
    marks: MockMarksRepository,
    students: MockStudentRepository,
) -> MarksService<MockMarksRepository, MockStudentRepository> {
    MarksService::new(Arc::new(marks), Arc::new(students))
}

fn student(id: StudentId) -> Student {
    let now = Utc::now();
    Student {
        id,
        name: StudentName::new("Alice").expect("name"),
        email: EmailAddress::new("a@x.com").expect("email"),
        age: Age::new(20).expect("age"),
        created_at: now,
        updated_at: now,
    }
}

fn entry(subject: &str, marks: i64) -> SubjectEntry {
    SubjectEntry::new(
        SubjectName::new(subject).expect("subject"),
        Marks::new(marks).expect("marks"),
    )
}

fn record(student_id: StudentId, subjects: Vec<SubjectEntry>) -> MarksRecord {
    let now = Utc::now();
    MarksRecord {
        id: Uuid::new_v4(),
        student_id,
        subjects,
        created_at: now,
        updated_at: now,
    }
}

fn subject(raw: &str) -> SubjectName {
    SubjectName::new(raw).expect("subject")
}

#[tokio::test]
async fn add_subject_appends_for_existing_student() {
    let id = StudentId::random();
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(student(id))));
    let mut marks = MockMarksRepository::new();
    marks
        .expect_append_subject()
        .withf(move |student_id, added| *student_id == id && added.subject.as_ref() == "Math")
        .times(1)
        .return_once(move |_, added| Ok(record(id, vec![added.clone()])));

    let service = make_service(marks, students);
    let saved = service
        .add_subject(AddSubjectRequest {
            student_id: id,
            entry: entry("Math", 90),
        })
        .await
        .expect("add succeeds");

    assert_eq!(saved.student_id, id);
    assert_eq!(saved.subjects, vec![entry("Math", 90)]);
}

#[tokio::test]
async fn add_subject_rejects_unknown_student_before_writing() {
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    let mut marks = MockMarksRepository::new();
    marks.expect_append_subject().times(0);

    let service = make_service(marks, students);
    let error = service
        .add_subject(AddSubjectRequest {
            student_id: StudentId::random(),
            entry: entry("Math", 90),
        })
        .await
        .expect_err("unknown student");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "student not found");
}

#[tokio::test]
async fn list_subjects_is_empty_without_record() {
    let mut marks = MockMarksRepository::new();
    marks
        .expect_find_by_student()
        .times(1)
        .return_once(|_| Ok(None));

    let service = make_service(marks, MockStudentRepository::new());
    let subjects = service
        .list_subjects(StudentId::random())
        .await
        .expect("list succeeds");

    assert!(subjects.is_empty());
}

#[tokio::test]
async fn remove_subject_filters_case_insensitively() {
    let id = StudentId::random();
    let mut marks = MockMarksRepository::new();
    marks.expect_find_by_student().times(1).return_once(move |_| {
        Ok(Some(record(
            id,
            vec![entry("Math", 90), entry("Science", 85), entry("MATH", 40)],
        )))
    });
    marks
        .expect_replace_subjects()
        .withf(|_, subjects| subjects == [entry("Science", 85)])
        .times(1)
        .return_once(move |_, subjects| Ok(Some(record(id, subjects.to_vec()))));

    let service = make_service(marks, MockStudentRepository::new());
    let remaining = service
        .remove_subject(id, subject(" math "))
        .await
        .expect("remove succeeds");

    assert_eq!(remaining, vec![entry("Science", 85)]);
}

#[tokio::test]
async fn remove_subject_reports_missing_record() {
    let mut marks = MockMarksRepository::new();
    marks
        .expect_find_by_student()
        .times(1)
        .return_once(|_| Ok(None));
    marks.expect_replace_subjects().times(0);

    let service = make_service(marks, MockStudentRepository::new());
    let error = service
        .remove_subject(StudentId::random(), subject("Math"))
        .await
        .expect_err("missing record");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "marks record not found");
    assert_eq!(
        error.details().and_then(|details| details.get("code")),
        Some(&serde_json::json!("marks_record_not_found"))
    );
}

#[tokio::test]
async fn remove_subject_reports_unmatched_subject() {
    let id = StudentId::random();
    let mut marks = MockMarksRepository::new();
    marks
        .expect_find_by_student()
        .with(eq(id))
        .times(1)
        .return_once(move |_| Ok(Some(record(id, vec![entry("Science", 85)]))));
    marks.expect_replace_subjects().times(0);

    let service = make_service(marks, MockStudentRepository::new());
    let error = service
        .remove_subject(id, subject("History"))
        .await
        .expect_err("unmatched subject");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "subject not found");
    assert_eq!(
        error.details().and_then(|details| details.get("code")),
        Some(&serde_json::json!("subject_not_found"))
    );
}

#[tokio::test]
async fn storage_outage_maps_to_service_unavailable() {
    let mut marks = MockMarksRepository::new();
    marks
        .expect_find_by_student()
        .times(1)
        .return_once(|_| Err(MarksRepositoryError::connection("refused")));

    let service = make_service(marks, MockStudentRepository::new());
    let error = service
        .list_subjects(StudentId::random())
        .await
        .expect_err("outage");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
