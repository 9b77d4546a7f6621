//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use student_records::inbound::http::health::HealthState;
use student_records::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use student_records::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;

    let mut config = ServerConfig::new(settings.bind_addr());
    if let Some(database_url) = settings.database_url() {
        let pool = connect(database_url, settings.db_max_connections()).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(addr = %settings.bind_addr(), "server listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}

/// Apply pending migrations, then open the connection pool.
async fn connect(database_url: &str, max_connections: u32) -> io::Result<DbPool> {
    let url = database_url.to_owned();
    let applied = web::block(move || run_migrations(&url))
        .await
        .map_err(|e| io::Error::other(format!("migration task failed: {e}")))?
        .map_err(|e| io::Error::other(format!("failed to run migrations: {e}")))?;
    info!(applied, "database schema is up to date");

    DbPool::new(PoolConfig::new(database_url).with_max_size(max_connections))
        .await
        .map_err(|e| io::Error::other(e.to_string()))
}
