//! Bootstrap of embedded PostgreSQL clusters for integration tests.
//!
//! `pg-embed-setup-unpriv` installs into `/var/tmp` by default. When
//! `PG_RUNTIME_DIR` or `PG_DATA_DIR` is unset, both are pointed at a unique
//! directory under the cargo target dir for the duration of the bootstrap.
//! Bootstraps are serialised because they mutate the process environment.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const ATTEMPTS: u32 = 4;
const BACKOFF: Duration = Duration::from_millis(500);

const TRANSIENT_MARKERS: [&str; 6] = [
    "error decoding response body",
    "connection reset",
    "connection refused",
    "timed out",
    "dns error",
    "temporarily unavailable",
];

fn scratch_dirs() -> std::io::Result<(String, String)> {
    let target = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target"));
    let base = target
        .join("pg-embed")
        .join(format!("{}-{}", std::process::id(), Uuid::new_v4().simple()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((
        runtime_dir.to_string_lossy().into_owned(),
        data_dir.to_string_lossy().into_owned(),
    ))
}

fn is_transient(message: &str) -> bool {
    let lowered = message.to_lowercase();
    TRANSIENT_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Start a [`TestCluster`], retrying transient download failures with
/// exponential backoff.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let overrides_needed =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if overrides_needed {
        let (runtime_dir, data_dir) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir)),
            ("PG_DATA_DIR", Some(data_dir)),
        ]))
    } else {
        None
    };

    let mut attempt = 0;
    loop {
        attempt += 1;
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                let message = format!("{err:?}");
                if attempt >= ATTEMPTS || !is_transient(&message) {
                    return Err(message);
                }
                let delay = BACKOFF * 2u32.pow(attempt - 1);
                eprintln!("pg-embed: attempt {attempt}/{ATTEMPTS} failed, retrying in {delay:?}: {message}");
                std::thread::sleep(delay);
            }
        }
    }
}
