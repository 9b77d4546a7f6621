//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::{HttpResponse, get, web};

pub mod error;
pub mod health;
pub mod marks;
pub mod schemas;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
mod validation;

pub use error::{ApiResult, json_error_handler};

/// Register the `/api` routes and the JSON extractor error handler.
///
/// ```
/// use actix_web::{App, web};
/// use student_records::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(students::create_student)
        .service(students::list_students)
        .service(students::get_student)
        .service(students::update_student)
        .service(students::delete_student)
        .service(marks::add_mark)
        .service(marks::list_marks)
        .service(marks::delete_subject);
}

/// Plain-text greeting served at `/`.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain")),
    tags = ["health"]
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hello World!")
}
