//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the schema wrappers from
//! [`crate::inbound::http::schemas`]. Swagger UI serves it at `/docs` in
//! debug builds and `cargo run --bin openapi-dump` prints it.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    AddMarkRequest, CreateStudentRequest, DeleteSubjectRequest, ErrorCodeSchema, ErrorSchema,
    MarksRecordSchema, MessageResponse, StudentPage, StudentSchema, StudentWithMarksSchema,
    SubjectDeletedResponse, SubjectEntrySchema, UpdateStudentRequest,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student records API",
        description = "Create, list, update and delete students and their per-subject marks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::index,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::marks::add_mark,
        crate::inbound::http::marks::list_marks,
        crate::inbound::http::marks::delete_subject,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        StudentSchema,
        SubjectEntrySchema,
        MarksRecordSchema,
        StudentWithMarksSchema,
        StudentPage,
        CreateStudentRequest,
        UpdateStudentRequest,
        AddMarkRequest,
        DeleteSubjectRequest,
        MessageResponse,
        SubjectDeletedResponse,
    )),
    tags(
        (name = "students", description = "Student records"),
        (name = "marks", description = "Per-subject marks for a student"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
