use std::time::Duration;

use picnic_domain::NodeExecutionItem;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// Logs go to stderr so stdout carries only batch output. `RUST_LOG`
/// overrides the default `info` filter; `PICNIC_LOG_JSON=1` switches to JSON
/// lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var("PICNIC_LOG_JSON").is_ok_and(|v| matches!(v.trim(), "1" | "true"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    // A subscriber may already be installed (tests, embedding hosts).
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

/// Log the outcome of a completed batch with structured fields.
pub fn log_batch_summary(output: &[NodeExecutionItem], elapsed: Duration) {
    let failed = output.iter().filter(|item| !item.is_success()).count();
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    info!(items = output.len(), failed, duration_ms, "batch_summary");
}
