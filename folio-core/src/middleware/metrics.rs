//! Request observability layer
//!
//! Tags every request with an `x-request-id` (propagated when the client
//! sends one), wraps it in a tracing span and records per-route-group
//! counters and latency histograms.

use axum::{body::Body, http::Request, response::Response};
use metrics::{counter, gauge, histogram};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct ObservabilityLayer;

impl<S> Layer<S> for ObservabilityLayer {
    type Service = Observed<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Observed { inner }
    }
}

#[derive(Clone)]
pub struct Observed<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for Observed<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let group = route_group(request.uri().path());
        let route = collapse_identifiers(request.uri().path());
        let method = request.method().as_str().to_owned();
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let span = tracing::info_span!("http", %request_id, %method, %route);
        let started = Instant::now();
        gauge!("folio_http_requests_in_flight").increment(1.0);

        // Take the service that was driven to readiness
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(
            async move {
                let result = inner.call(request).await;
                gauge!("folio_http_requests_in_flight").decrement(1.0);

                let mut response = result?;
                let status = response.status();
                let elapsed = started.elapsed();

                counter!(
                    "folio_http_requests_total",
                    "group" => group,
                    "route" => route,
                    "status" => status.as_u16().to_string()
                )
                .increment(1);
                histogram!("folio_http_request_duration_seconds", "group" => group)
                    .record(elapsed.as_secs_f64());
                tracing::debug!(status = status.as_u16(), elapsed_ms = elapsed.as_millis() as u64, "Request finished");

                if let Ok(value) = request_id.parse() {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                Ok(response)
            }
            .instrument(span),
        )
    }
}

/// Which guard group a path belongs to
fn route_group(path: &str) -> &'static str {
    if path.starts_with("/api/v1/admin/") || path == "/api/v1/admin" {
        "administrator"
    } else if path.starts_with("/api/v1/auth/") {
        match path {
            "/api/v1/auth/refresh" | "/api/v1/auth/me" => "authenticated",
            _ => "public",
        }
    } else if path.starts_with("/api/v1/") {
        "authenticated"
    } else {
        "operational"
    }
}

/// Replace record ids and principal uids with `{id}` so route labels stay
/// bounded.
fn collapse_identifiers(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        let after_users = segments.last().is_some_and(|prev| *prev == "users" || *prev == "registry");
        if is_record_id(segment) || (after_users && !segment.is_empty()) {
            segments.push("{id}");
        } else {
            segments.push(segment);
        }
    }
    segments.join("/")
}

fn is_record_id(segment: &str) -> bool {
    uuid::Uuid::parse_str(segment).is_ok()
}
