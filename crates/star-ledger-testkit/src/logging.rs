//! Test logging.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`, defaulting to `star_ledger=debug`. Safe to call from
/// every test; only the first call installs anything.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("star_ledger=debug"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .try_init();
}
