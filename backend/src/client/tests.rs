//! Client tests against a live in-memory server.

use std::net::TcpListener;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use reqwest::StatusCode;
use rstest::rstest;

use super::*;
use crate::Trace;
use crate::domain::ErrorCode;
use crate::inbound::http::configure_api;
use crate::inbound::http::test_utils::memory_state;

struct LiveServer {
    client: RecordsClient,
    handle: ServerHandle,
}

impl LiveServer {
    fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let state = web::Data::new(memory_state());
        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(Trace)
                .service(web::scope("/api").configure(configure_api))
        })
        .workers(1)
        .listen(listener)
        .expect("listen")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let client = RecordsClient::new(&format!("http://{addr}/api")).expect("client");
        Self { client, handle }
    }

    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

#[rstest]
#[case("not a url")]
#[case("mailto:someone@example.com")]
fn rejects_unusable_base_urls(#[case] base: &str) {
    let err = RecordsClient::new(base).expect_err("base URL should be rejected");
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[rstest]
#[case("http://localhost:3000/api")]
#[case("http://localhost:3000/api/")]
fn endpoints_extend_the_base_path(#[case] base: &str) {
    let client = RecordsClient::new(base).expect("client");
    let url = client
        .endpoint(&["marks", "student", "a/b", "subject"])
        .expect("endpoint");
    assert_eq!(
        url.as_str(),
        "http://localhost:3000/api/marks/student/a%2Fb/subject"
    );
}

#[actix_web::test]
async fn full_lifecycle_over_http() {
    let server = LiveServer::start();
    let client = &server.client;

    let created = client
        .create_student(" Alice ", "Alice@Example.com", 20)
        .await
        .expect("create");
    assert_eq!(created.name.to_string(), "Alice");
    assert_eq!(created.email.to_string(), "alice@example.com");
    let id = created.id.to_string();

    client.add_mark(&id, "Math", 90).await.expect("add math");
    let record = client.add_mark(&id, "Science", 85).await.expect("add science");
    assert_eq!(record.student_id, created.id);
    assert_eq!(record.subjects.len(), 2);

    let page = client.list_students(Some(1), Some(5)).await.expect("list");
    assert_eq!((page.page, page.limit, page.total), (1, 5, 1));

    let patched = client
        .update_student(
            &id,
            &StudentPatch {
                age: Some(21),
                ..StudentPatch::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(patched.age.to_string(), "21");
    assert_eq!(patched.name, created.name);

    let removed = client.delete_subject(&id, "MATH").await.expect("delete subject");
    assert_eq!(removed.subjects.len(), 1);
    assert_eq!(removed.subjects[0].subject.to_string(), "Science");

    let fetched = client.get_student(&id).await.expect("get");
    assert_eq!(fetched.marks, client.list_marks(&id).await.expect("marks"));

    client.delete_student(&id).await.expect("delete");
    let err = client.get_student(&id).await.expect_err("student is gone");
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(client.list_marks(&id).await.expect("marks").is_empty());

    server.stop().await;
}

#[actix_web::test]
async fn server_errors_decode_into_the_envelope() {
    let server = LiveServer::start();
    let client = &server.client;

    client
        .create_student("Alice", "a@x.com", 20)
        .await
        .expect("create");
    let duplicate = client
        .create_student("Bob", "A@X.com", 30)
        .await
        .expect_err("duplicate email");
    let invalid = client
        .get_student("not-a-uuid")
        .await
        .expect_err("malformed id");

    assert_eq!(duplicate.status(), Some(StatusCode::CONFLICT));
    assert_eq!(
        duplicate.api_error().map(|error| error.code()),
        Some(ErrorCode::Conflict)
    );
    assert_eq!(
        invalid.api_error().map(|error| error.code()),
        Some(ErrorCode::InvalidRequest)
    );
    assert!(
        invalid
            .api_error()
            .and_then(|error| error.trace_id())
            .is_some()
    );

    server.stop().await;
}
