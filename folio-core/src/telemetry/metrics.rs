//! Prometheus metrics setup and metric definitions

use anyhow::Context;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    let buckets = vec![
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .context("failed to set histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Register metric descriptions and emit initial zero values so Prometheus output
/// includes HELP/TYPE lines for all metrics from startup.
pub fn describe_metrics() {
    describe_counter!("folio_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "folio_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "folio_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    describe_counter!(
        "folio_role_checks_total",
        "Administrator checks by step (token_claim/registry) and outcome"
    );
    describe_counter!(
        "folio_role_classifications_total",
        "Role classifications by result"
    );
    describe_counter!(
        "folio_route_guard_decisions_total",
        "Route guard decisions by requirement and state"
    );
    describe_counter!("folio_auth_sign_in_total", "Sign-in attempts by result");
    describe_counter!("folio_media_uploads_total", "Media uploads by result");

    counter!("folio_role_checks_total", "step" => "token_claim", "outcome" => "unavailable")
        .absolute(0);
    counter!("folio_role_checks_total", "step" => "registry", "outcome" => "unavailable")
        .absolute(0);
    counter!("folio_role_classifications_total", "result" => "administrator").absolute(0);
    counter!("folio_auth_sign_in_total", "result" => "success").absolute(0);
    counter!("folio_media_uploads_total", "result" => "success").absolute(0);
    gauge!("folio_http_requests_in_flight").set(0.0);
}
