//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use student_records::inbound::http::state::HttpState;
use student_records::outbound::persistence::{DieselMarksRepository, DieselStudentRepository};

use super::ServerConfig;

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over process memory.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => HttpState::over_repositories(
            Arc::new(DieselStudentRepository::new(pool.clone())),
            Arc::new(DieselMarksRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; records are kept in memory and lost on exit");
            HttpState::in_memory(Arc::new(DefaultClock))
        }
    };
    web::Data::new(state)
}
