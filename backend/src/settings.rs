//! Server settings loaded via OrthoConfig.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::DEFAULT_MAX_CONNECTIONS;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Listener and storage settings for the records server.
///
/// Every field can be set from CLI flags, `RECORDS_*` environment variables
/// or a configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECORDS")]
pub struct ServerSettings {
    /// Address to bind the HTTP listener to.
    pub host: Option<IpAddr>,
    /// Port to bind the HTTP listener to.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// PostgreSQL connection string. In-memory storage is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServerSettings {
    /// Socket address built from the configured host and port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port,
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, falling back to [`DEFAULT_MAX_CONNECTIONS`].
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}
