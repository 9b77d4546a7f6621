//! Student API handlers.
//!
//! ```text
//! POST   /api/students        {"name":"Alice","email":"A@X.com","age":20}
//! GET    /api/students?page=1&limit=10
//! GET    /api/students/{id}
//! PUT    /api/students/{id}   {"age":21}
//! DELETE /api/students/{id}
//! ```

use std::collections::HashMap;

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Paginated, PageRequest};
use serde_json::{Map, Value, json};

use crate::domain::ports::StudentWithMarks;
use crate::domain::{Age, EmailAddress, NewStudent, Student, StudentChanges, StudentName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    CreateStudentRequest, ErrorSchema, MessageResponse, StudentPage, StudentSchema,
    StudentWithMarksSchema, UpdateStudentRequest,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ViolationCode, Violations, object_body, parse_field, parse_student_id,
    read_non_negative_integer, read_string,
};

const ID: FieldName = FieldName::new("id");
const NAME: FieldName = FieldName::new("name");
const EMAIL: FieldName = FieldName::new("email");
const AGE: FieldName = FieldName::new("age");

/// Confirmation returned by `DELETE /api/students/{id}`.
pub const STUDENT_DELETED_MESSAGE: &str = "Student and marks deleted";

struct StudentFields {
    name: Option<StudentName>,
    email: Option<EmailAddress>,
    age: Option<Age>,
}

fn read_student_fields(
    body: &Map<String, Value>,
    required: bool,
    violations: &mut Violations,
) -> StudentFields {
    let name = read_string(body, NAME, required, violations);
    let email = read_string(body, EMAIL, required, violations);
    let age = read_non_negative_integer(body, AGE, required, violations);

    StudentFields {
        name: parse_field(name, NAME, ViolationCode::EmptyString, violations, StudentName::new),
        email: parse_field(email, EMAIL, ViolationCode::InvalidEmail, violations, EmailAddress::new),
        age: parse_field(age, AGE, ViolationCode::OutOfRange, violations, Age::new),
    }
}

fn parse_new_student(body: &Value) -> ApiResult<NewStudent> {
    let body = object_body(body)?;
    let mut violations = Violations::new();
    let fields = read_student_fields(body, true, &mut violations);

    match fields {
        StudentFields {
            name: Some(name),
            email: Some(email),
            age: Some(age),
        } if violations.is_empty() => Ok(NewStudent { name, email, age }),
        _ => Err(violations.into_error()),
    }
}

fn parse_student_changes(body: &Value) -> ApiResult<StudentChanges> {
    let body = object_body(body)?;
    let mut violations = Violations::new();
    let StudentFields { name, email, age } = read_student_fields(body, false, &mut violations);

    if violations.is_empty() {
        Ok(StudentChanges { name, email, age })
    } else {
        Err(violations.into_error())
    }
}

/// Register a student.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let student = parse_new_student(&payload)?;
    let created = state.students.create(student).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List students one page at a time.
///
/// `page` and `limit` are read leniently: a leading integer is used, values
/// below one become one and anything unparsable falls back to the default.
#[utoipa::path(
    get,
    path = "/api/students",
    params(
        ("page" = Option<String>, Query, description = "Page number, default 1"),
        ("limit" = Option<String>, Query, description = "Page size, default 10")
    ),
    responses(
        (status = 200, description = "Page of students", body = StudentPage),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
    query: web::Query<HashMap<String, String>>,
) -> ApiResult<web::Json<Paginated<Student>>> {
    let request = PageRequest::from_query(
        query.get("page").map(String::as_str),
        query.get("limit").map(String::as_str),
    );
    let page = state.students_query.list(request).await?;
    Ok(web::Json(page))
}

/// Fetch a student together with their subject entries.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student and marks", body = StudentWithMarksSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentWithMarks>> {
    let id = parse_student_id(&path, ID)?;
    let found = state.students_query.get_with_marks(id).await?;
    Ok(web::Json(found))
}

/// Apply a partial update to a student.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Updated student", body = StudentSchema),
        (status = 400, description = "Malformed identifier or body", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<Student>> {
    let id = parse_student_id(&path, ID)?;
    let changes = parse_student_changes(&payload)?;
    let updated = state.students.update(id, changes).await?;
    Ok(web::Json(updated))
}

/// Delete a student and their marks record.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_student_id(&path, ID)?;
    state.students.delete(id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": STUDENT_DELETED_MESSAGE })))
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
