//! Helpers shared by the Diesel adapter suites.
//!
//! Integration tests compile as separate crates, so anything two suites need
//! lives here and is pulled in with `mod support;`.

pub mod embedded_postgres;

pub use embedded_postgres::{PreparedDatabase, prepare_database};

/// True when `SKIP_TEST_CLUSTER` is "1", "true" or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip quietly when the caller opted out of the embedded cluster, otherwise
/// fail loudly so a broken cluster never passes as green.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
