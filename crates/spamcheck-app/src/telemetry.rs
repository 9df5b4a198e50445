//! Logging and metrics setup

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const PREDICTIONS_TOTAL: &str = "spamcheck_predictions_total";
pub const WARNINGS_TOTAL: &str = "spamcheck_warnings_total";
pub const ERRORS_TOTAL: &str = "spamcheck_errors_total";
pub const INFERENCE_LATENCY_US: &str = "spamcheck_inference_latency_us";

/// Initialize tracing/logging. Logs go to stderr so `predict` output stays clean.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("spamcheck=debug,spamcheck_app=debug,spamcheck_classifiers=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("spamcheck=info,spamcheck_app=info,spamcheck_classifiers=info,tower_http=warn")
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics exporter and return handle for rendering
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(PREDICTIONS_TOTAL, "Total number of predictions by verdict");
    metrics::describe_counter!(WARNINGS_TOTAL, "Total number of blank-input warnings");
    metrics::describe_counter!(ERRORS_TOTAL, "Total number of failed interactions by kind");
    metrics::describe_histogram!(
        INFERENCE_LATENCY_US,
        metrics::Unit::Microseconds,
        "Vectorize + predict latency in microseconds"
    );

    tracing::info!("Metrics exporter initialized");
    Ok(handle)
}
