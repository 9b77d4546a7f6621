//! Opt-in and skip policy for suites that need embedded PostgreSQL.
//!
//! Suites run only when `RUN_PG_EMBEDDED=1`. When the cluster cannot start,
//! `SKIP_TEST_CLUSTER` decides between skipping and failing loudly.

fn is_truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Returns true when `RUN_PG_EMBEDDED` opts into the embedded cluster.
pub fn embedded_postgres_enabled() -> bool {
    is_truthy("RUN_PG_EMBEDDED")
}

/// Returns true when the `SKIP_TEST_CLUSTER` environment variable is set to a
/// truthy value ("1", "true", "yes", case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    is_truthy("SKIP_TEST_CLUSTER")
}

/// Handles embedded cluster setup failures consistently across suites.
///
/// When `SKIP_TEST_CLUSTER` is truthy, prints a skip marker and returns `None`.
/// Otherwise, panics so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
