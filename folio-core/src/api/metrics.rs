//! Prometheus scrape endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Render the recorder in text exposition format; 404 when metrics are off
pub async fn metrics_handler(
    State(recorder): State<Arc<Option<PrometheusHandle>>>,
) -> impl IntoResponse {
    let Some(handle) = recorder.as_ref() else {
        return (StatusCode::NOT_FOUND, String::from("metrics disabled"));
    };
    (StatusCode::OK, handle.render())
}
