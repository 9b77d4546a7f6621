//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;

use crate::Trace;
use crate::domain::ports::{
    MockMarksCommand, MockMarksQuery, MockStudentsCommand, MockStudentsQuery,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;

/// Handler state backed by fresh in-memory repositories.
pub fn memory_state() -> HttpState {
    HttpState::in_memory(Arc::new(DefaultClock))
}

/// Handler state whose ports panic on any unexpected call.
pub fn mock_state(
    students: MockStudentsCommand,
    students_query: MockStudentsQuery,
    marks: MockMarksCommand,
    marks_query: MockMarksQuery,
) -> HttpState {
    HttpState::new(
        Arc::new(students),
        Arc::new(students_query),
        Arc::new(marks),
        Arc::new(marks_query),
    )
}

/// Handler state with no expectations set on any port.
pub fn untouched_state() -> HttpState {
    mock_state(
        MockStudentsCommand::new(),
        MockStudentsQuery::new(),
        MockMarksCommand::new(),
        MockMarksQuery::new(),
    )
}

/// App serving the `/api` routes over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(web::scope("/api").configure(configure_api))
}
