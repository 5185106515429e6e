//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the binary logs at `default_level`
/// and everything else at `warn`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,{}={level},campuslink_server={level},campuslink_shared={level}",
            bin_name.replace('-', "_"),
            level = default_level
        ))
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::debug!("Tracing initialized for {}", bin_name);
}
