//! Liveness and readiness probes

use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Liveness {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Readiness {
    pub ready: bool,
    pub database: &'static str,
}

pub async fn health() -> impl IntoResponse {
    Json(Liveness {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Ready once the document store answers
pub async fn ready<S: HasServices>(State(state): State<S>) -> impl IntoResponse {
    let ready = state.check_ready().await;
    let status = if ready {
        StatusCode::OK
    } else {
        tracing::warn!("Readiness probe failed: database unreachable");
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(Readiness {
            ready,
            database: if ready { "up" } else { "down" },
        }),
    )
}
