//! Prometheus metrics recorder for simulation runs.
//!
//! There is no scrape endpoint: the snapshot is rendered once the run ends.

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    // Answer times in seconds
    let builder = PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("review_time_seconds".to_string()),
        &[1.0, 2.0, 4.0, 6.0, 8.0, 10.0, 15.0, 20.0, 30.0, 60.0],
    )?;

    let handle = builder.install_recorder()?;

    Ok(handle)
}
