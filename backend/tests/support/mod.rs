//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; each
//! suite pulls this module in with `mod support;`.

pub mod cluster_skip;
pub mod pg_embed;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use student_records::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use tokio::runtime::Runtime;
use uuid::Uuid;

pub use cluster_skip::{embedded_postgres_enabled, handle_cluster_setup_failure};

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// The `Display` output often collapses to a bare `db error`, hiding the
/// message and SQLSTATE.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// A migrated, uniquely named database on its own embedded cluster.
///
/// Fields drop in order: the runtime stops pool tasks before the cluster
/// shuts down.
pub struct MigratedDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub url: String,
    _cluster: TestCluster,
}

impl MigratedDatabase {
    /// Start a cluster, create a fresh database and apply every migration.
    pub fn start() -> Result<Self, String> {
        let cluster = pg_embed::test_cluster()?;
        let name = format!("records_{}", Uuid::new_v4().simple());

        let admin_url = cluster.connection().database_url("postgres");
        let mut admin = Client::connect(&admin_url, NoTls)
            .map_err(|err| format_postgres_error(&err))?;
        admin
            .batch_execute(&format!("CREATE DATABASE \"{name}\""))
            .map_err(|err| format_postgres_error(&err))?;

        let url = cluster.connection().database_url(&name);
        run_migrations(&url).map_err(|err| err.to_string())?;

        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let config = PoolConfig::new(&url)
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            url,
            _cluster: cluster,
        })
    }

    /// Run raw SQL against the database outside the pool.
    pub fn execute(&self, sql: &str) -> Result<(), String> {
        let mut client =
            Client::connect(&self.url, NoTls).map_err(|err| format_postgres_error(&err))?;
        client
            .batch_execute(sql)
            .map_err(|err| format_postgres_error(&err))
    }
}

/// Fixture body shared by the suites: `None` means the test should return.
pub fn migrated_database() -> Option<MigratedDatabase> {
    if !embedded_postgres_enabled() {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return None;
    }
    match MigratedDatabase::start() {
        Ok(database) => Some(database),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
