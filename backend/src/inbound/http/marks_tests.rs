//! Tests for marks HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::SUBJECT_DELETED_MESSAGE;
use crate::inbound::http::test_utils::{memory_state, test_app, untouched_state};

const UNKNOWN_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

macro_rules! send {
    ($app:expr, $request:expr) => {{
        let response = actix_test::call_service(&$app, $request.to_request()).await;
        let status = response.status();
        let body: Value = actix_test::read_body_json(response).await;
        (status, body)
    }};
}

macro_rules! create_student {
    ($app:expr, $email:expr) => {{
        let (status, body) = send!(
            $app,
            actix_test::TestRequest::post()
                .uri("/api/students")
                .set_json(json!({ "name": "Alice", "email": $email, "age": 20 }))
        );
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().expect("student id").to_owned()
    }};
}

macro_rules! add_mark {
    ($app:expr, $student:expr, $subject:expr, $marks:expr) => {
        send!(
            $app,
            actix_test::TestRequest::post().uri("/api/marks").set_json(json!({
                "studentId": $student,
                "subject": $subject,
                "marks": $marks,
            }))
        )
    };
}

fn subject_names(subjects: &Value) -> Vec<String> {
    subjects
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("subject").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn violation_paths(body: &Value) -> Vec<String> {
    body.pointer("/details/violations")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("path").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

#[actix_web::test]
async fn add_mark_upserts_without_deduplicating() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let student = create_student!(app, "a@x.com");

    let (first_status, first) = add_mark!(app, student, " Math ", 90);
    let (_, second) = add_mark!(app, student, "Math", 70);
    let (_, third) = add_mark!(app, student, "Science", 85);

    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(first["id"], third["id"]);
    assert_eq!(second["studentId"], student.as_str());
    assert_eq!(subject_names(&third["subjects"]), ["Math", "Math", "Science"]);
}

#[actix_web::test]
async fn add_mark_for_unknown_student_is_not_found() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let (status, body) = add_mark!(app, UNKNOWN_ID, "Math", 90);

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "student not found");
}

#[rstest]
#[case(json!({ "subject": "Math", "marks": 90 }), &["studentId"])]
#[case(json!({ "studentId": "nope", "subject": "Math", "marks": 90 }), &["studentId"])]
#[case(json!({ "studentId": UNKNOWN_ID, "subject": "  ", "marks": 90 }), &["subject"])]
#[case(json!({ "studentId": UNKNOWN_ID, "subject": "Math", "marks": -5 }), &["marks"])]
#[case(json!({ "studentId": UNKNOWN_ID, "subject": "Math", "marks": 9.5 }), &["marks"])]
#[case(json!({}), &["studentId", "subject", "marks"])]
#[actix_web::test]
async fn add_mark_validates_before_any_lookup(#[case] payload: Value, #[case] paths: &[&str]) {
    let app = actix_test::init_service(test_app(untouched_state())).await;

    let (status, body) = send!(
        app,
        actix_test::TestRequest::post().uri("/api/marks").set_json(payload)
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(violation_paths(&body), paths);
}

#[actix_web::test]
async fn list_marks_is_empty_without_a_record() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let (status, body) = send!(
        app,
        actix_test::TestRequest::get().uri(&format!("/api/marks/student/{UNKNOWN_ID}"))
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn list_marks_rejects_malformed_ids() {
    let app = actix_test::init_service(test_app(untouched_state())).await;

    let (status, body) = send!(
        app,
        actix_test::TestRequest::get().uri("/api/marks/student/123")
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(violation_paths(&body), ["studentId"]);
}

#[actix_web::test]
async fn delete_subject_checks_subject_before_id() {
    let app = actix_test::init_service(test_app(untouched_state())).await;

    let (status, body) = send!(
        app,
        actix_test::TestRequest::delete()
            .uri("/api/marks/student/not-a-uuid/subject")
            .set_json(json!({}))
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(violation_paths(&body), ["subject"]);
}

#[actix_web::test]
async fn delete_subject_removes_case_insensitive_matches() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let student = create_student!(app, "a@x.com");
    for (subject, marks) in [("Math", 90), ("MATH", 60), ("Science", 85), ("math", 40)] {
        add_mark!(app, student, subject, marks);
    }

    let (status, body) = send!(
        app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/marks/student/{student}/subject"))
            .set_json(json!({ "subject": " Math " }))
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], SUBJECT_DELETED_MESSAGE);
    assert_eq!(subject_names(&body["subjects"]), ["Science"]);
}

#[actix_web::test]
async fn delete_subject_distinguishes_missing_record_and_subject() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let student = create_student!(app, "a@x.com");
    let uri = format!("/api/marks/student/{student}/subject");

    let (no_record, record_body) = send!(
        app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .set_json(json!({ "subject": "Math" }))
    );
    assert_eq!(no_record, StatusCode::NOT_FOUND);
    assert_eq!(record_body["details"]["code"], "marks_record_not_found");

    add_mark!(app, student, "Science", 85);
    let (no_subject, subject_body) = send!(
        app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .set_json(json!({ "subject": "Math" }))
    );
    assert_eq!(no_subject, StatusCode::NOT_FOUND);
    assert_eq!(subject_body["details"]["code"], "subject_not_found");
}

#[actix_web::test]
async fn student_lifecycle_end_to_end() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let (_, created) = send!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/students")
            .set_json(json!({ "name": "Alice", "email": "A@X.com", "age": 20 }))
    );
    assert_eq!(created["email"], "a@x.com");
    let student = created["id"].as_str().expect("id").to_owned();

    add_mark!(app, student, "Math", 90);
    add_mark!(app, student, "Science", 85);
    let marks_uri = format!("/api/marks/student/{student}");
    let (_, subjects) = send!(app, actix_test::TestRequest::get().uri(&marks_uri));
    assert_eq!(subject_names(&subjects), ["Math", "Science"]);

    let (_, removed) = send!(
        app,
        actix_test::TestRequest::delete()
            .uri(&format!("{marks_uri}/subject"))
            .set_json(json!({ "subject": "math" }))
    );
    assert_eq!(subject_names(&removed["subjects"]), ["Science"]);

    let (_, with_marks) = send!(
        app,
        actix_test::TestRequest::get().uri(&format!("/api/students/{student}"))
    );
    assert_eq!(with_marks["student"]["id"], student.as_str());
    assert_eq!(subject_names(&with_marks["marks"]), ["Science"]);

    let student_uri = format!("/api/students/{student}");
    let (deleted, _) = send!(app, actix_test::TestRequest::delete().uri(&student_uri));
    assert_eq!(deleted, StatusCode::OK);

    let (gone, _) = send!(app, actix_test::TestRequest::get().uri(&student_uri));
    assert_eq!(gone, StatusCode::NOT_FOUND);
    let (_, after) = send!(app, actix_test::TestRequest::get().uri(&marks_uri));
    assert_eq!(after, json!([]));
}
