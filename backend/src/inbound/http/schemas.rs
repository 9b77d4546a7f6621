//! OpenAPI schema definitions for domain types and request bodies.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and are registered with
//! utoipa under the domain type's path.

use chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The referenced student, marks record or subject does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The write clashes with stored data, such as a taken email.
    #[schema(rename = "conflict")]
    Conflict,
    /// Storage is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "request validation failed")]
    message: String,
    /// Identifier echoed in the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details; validation failures list `violations`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Student`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Student, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentSchema {
    /// Student identifier.
    id: Uuid,
    /// Trimmed display name.
    #[schema(example = "Alice")]
    name: String,
    /// Lowercased, unique email address.
    #[schema(example = "alice@example.com")]
    email: String,
    /// Age in whole years.
    #[schema(minimum = 0, example = 20)]
    age: i32,
    /// Creation timestamp.
    created_at: DateTime<Utc>,
    /// Last update timestamp.
    updated_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::SubjectEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SubjectEntry)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SubjectEntrySchema {
    /// Trimmed subject name.
    #[schema(example = "Math")]
    subject: String,
    /// Score for the subject.
    #[schema(minimum = 0, example = 90)]
    marks: u32,
}

/// OpenAPI schema for [`crate::domain::MarksRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MarksRecord, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MarksRecordSchema {
    /// Record identifier.
    id: Uuid,
    /// Owning student.
    student_id: Uuid,
    /// Subject entries in insertion order.
    subjects: Vec<SubjectEntrySchema>,
    /// Creation timestamp.
    created_at: DateTime<Utc>,
    /// Last update timestamp.
    updated_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::ports::StudentWithMarks`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::StudentWithMarks)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentWithMarksSchema {
    /// The stored student.
    student: StudentSchema,
    /// Subject entries, empty when no marks were recorded.
    marks: Vec<SubjectEntrySchema>,
}

/// One page of students.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentPage {
    /// Students on this page in storage order.
    data: Vec<StudentSchema>,
    /// Effective page number, starting at 1.
    #[schema(example = 1)]
    page: u32,
    /// Effective page size.
    #[schema(example = 10)]
    limit: u32,
    /// Total number of stored students.
    #[schema(example = 15)]
    total: u64,
}

/// Request body for `POST /api/students`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateStudentRequest {
    /// Non-empty name; surrounding whitespace is trimmed.
    #[schema(example = "Alice")]
    name: String,
    /// Email address; trimmed and lowercased before storage.
    #[schema(example = "A@X.com")]
    email: String,
    /// Non-negative integer age.
    #[schema(minimum = 0, example = 20)]
    age: i64,
}

/// Request body for `PUT /api/students/{id}`; every field is optional.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdateStudentRequest {
    /// Replacement name.
    name: Option<String>,
    /// Replacement email.
    email: Option<String>,
    /// Replacement age.
    #[schema(minimum = 0)]
    age: Option<i64>,
}

/// Request body for `POST /api/marks`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AddMarkRequest {
    /// Student receiving the mark.
    student_id: Uuid,
    /// Non-empty subject name.
    #[schema(example = "Math")]
    subject: String,
    /// Non-negative integer score.
    #[schema(minimum = 0, example = 90)]
    marks: i64,
}

/// Request body for `DELETE /api/marks/student/{studentId}/subject`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DeleteSubjectRequest {
    /// Subject to remove, matched case-insensitively after trimming.
    #[schema(example = "math")]
    subject: String,
}

/// Confirmation body returned by student deletion.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    #[schema(example = "Student and marks deleted")]
    message: String,
}

/// Body returned after removing a subject.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SubjectDeletedResponse {
    /// Human-readable confirmation.
    #[schema(example = "Subject deleted")]
    message: String,
    /// Remaining subject entries.
    subjects: Vec<SubjectEntrySchema>,
}
