//! Marks API handlers.
//!
//! ```text
//! POST   /api/marks                                 {"studentId":"…","subject":"Math","marks":90}
//! GET    /api/marks/student/{studentId}
//! DELETE /api/marks/student/{studentId}/subject     {"subject":"math"}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde_json::{Value, json};

use crate::domain::ports::AddSubjectRequest;
use crate::domain::{Marks, StudentId, SubjectEntry, SubjectName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    AddMarkRequest, DeleteSubjectRequest, ErrorSchema, MarksRecordSchema, SubjectDeletedResponse,
    SubjectEntrySchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ViolationCode, Violations, object_body, parse_field, parse_student_id,
    read_non_negative_integer, read_string,
};

const STUDENT_ID: FieldName = FieldName::new("studentId");
const SUBJECT: FieldName = FieldName::new("subject");
const MARKS: FieldName = FieldName::new("marks");

/// Confirmation returned after removing a subject.
pub const SUBJECT_DELETED_MESSAGE: &str = "Subject deleted";

fn parse_add_subject(body: &Value) -> ApiResult<AddSubjectRequest> {
    let body = object_body(body)?;
    let mut violations = Violations::new();

    let student_id = read_string(body, STUDENT_ID, true, &mut violations);
    let subject = read_string(body, SUBJECT, true, &mut violations);
    let marks = read_non_negative_integer(body, MARKS, true, &mut violations);

    let student_id = parse_field(
        student_id,
        STUDENT_ID,
        ViolationCode::InvalidUuid,
        &mut violations,
        StudentId::new,
    );
    let subject = parse_field(
        subject,
        SUBJECT,
        ViolationCode::EmptyString,
        &mut violations,
        SubjectName::new,
    );
    let marks = parse_field(marks, MARKS, ViolationCode::OutOfRange, &mut violations, Marks::new);

    match (student_id, subject, marks) {
        (Some(student_id), Some(subject), Some(marks)) if violations.is_empty() => {
            Ok(AddSubjectRequest {
                student_id,
                entry: SubjectEntry::new(subject, marks),
            })
        }
        _ => Err(violations.into_error()),
    }
}

fn parse_subject(body: &Value) -> ApiResult<SubjectName> {
    let body = object_body(body)?;
    let mut violations = Violations::new();
    let subject = read_string(body, SUBJECT, true, &mut violations);
    let subject = parse_field(
        subject,
        SUBJECT,
        ViolationCode::EmptyString,
        &mut violations,
        SubjectName::new,
    );
    subject.ok_or_else(|| violations.into_error())
}

/// Append a subject entry to a student's marks, creating the record on first
/// use.
#[utoipa::path(
    post,
    path = "/api/marks",
    request_body = AddMarkRequest,
    responses(
        (status = 201, description = "Marks record after the append", body = MarksRecordSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["marks"],
    operation_id = "addMark"
)]
#[post("/marks")]
pub async fn add_mark(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let request = parse_add_subject(&payload)?;
    let record = state.marks.add_subject(request).await?;
    Ok(HttpResponse::Created().json(record))
}

/// List a student's subject entries; empty when none were recorded.
#[utoipa::path(
    get,
    path = "/api/marks/student/{studentId}",
    params(("studentId" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Subject entries", body = [SubjectEntrySchema]),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["marks"],
    operation_id = "listMarks"
)]
#[get("/marks/student/{student_id}")]
pub async fn list_marks(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<SubjectEntry>>> {
    let student_id = parse_student_id(&path, STUDENT_ID)?;
    let subjects = state.marks_query.list_subjects(student_id).await?;
    Ok(web::Json(subjects))
}

/// Remove every entry matching `subject` case-insensitively.
///
/// The body is checked before the path identifier.
#[utoipa::path(
    delete,
    path = "/api/marks/student/{studentId}/subject",
    params(("studentId" = String, Path, description = "Student identifier")),
    request_body = DeleteSubjectRequest,
    responses(
        (status = 200, description = "Remaining subjects", body = SubjectDeletedResponse),
        (status = 400, description = "Missing subject or malformed identifier", body = ErrorSchema),
        (status = 404, description = "Marks record or subject not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["marks"],
    operation_id = "deleteSubject"
)]
#[delete("/marks/student/{student_id}/subject")]
pub async fn delete_subject(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let subject = parse_subject(&payload)?;
    let student_id = parse_student_id(&path, STUDENT_ID)?;
    let subjects = state.marks.remove_subject(student_id, subject).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": SUBJECT_DELETED_MESSAGE,
        "subjects": subjects,
    })))
}

#[cfg(test)]
#[path = "marks_tests.rs"]
mod tests;
