use std::env;
use std::sync::OnceLock;

use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{info, warn};

static EXPORTER_STARTED: OnceLock<u16> = OnceLock::new();

/// Start a Prometheus exporter listening on `0.0.0.0:<port>`.
///
/// The port is resolved from the provided environment variable name or the
/// supplied `default_port`. Repeat calls are no-ops; a failed start is logged
/// and the service keeps running without an exporter.
pub fn init_metrics(port_env: &str, default_port: u16) {
    let port = env::var(port_env)
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(default_port);

    if EXPORTER_STARTED.get().is_some() {
        return;
    }

    match PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
    {
        Ok(()) => {
            let _ = EXPORTER_STARTED.set(port);
            info!(metrics_port = port, "started prometheus exporter");
        }
        Err(err) => {
            warn!(error = %err, metrics_port = port, "failed to start prometheus exporter");
        }
    }
}
