//! Route guard middleware
//!
//! Applies the guard state machine to each request. A request's session is
//! always determined: a missing or invalid bearer token is an absent
//! principal. Administrator routes classify the principal before the guard
//! state is derived, so the checking states never reach a response.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use metrics::counter;
use serde_json::json;

use super::auth::principal_from_headers;
use crate::authz::{GuardState, Rendering, RoleState, RouteRequirement};
use crate::identity::SessionState;
use crate::state::HasServices;

/// Guard for routes that need any signed-in principal
pub async fn require_authenticated<S: HasServices>(
    State(state): State<S>,
    request: Request<Body>,
    next: Next,
) -> Response {
    guard(state, RouteRequirement::Authenticated, request, next).await
}

/// Guard for administrator routes
pub async fn require_administrator<S: HasServices>(
    State(state): State<S>,
    request: Request<Body>,
    next: Next,
) -> Response {
    guard(state, RouteRequirement::Administrator, request, next).await
}

async fn guard<S: HasServices>(
    state: S,
    requirement: RouteRequirement,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let principal = principal_from_headers(request.headers(), state.jwt_manager()).ok();

    let role = match (&principal, requirement) {
        (Some(p), RouteRequirement::Administrator) => Some(RoleState::from(
            state.role_resolver().classify(Some(p)).await,
        )),
        _ => None,
    };

    let session = SessionState::Determined(principal);
    let guard_state = GuardState::derive(&session, role, requirement);

    counter!(
        "folio_route_guard_decisions_total",
        "requirement" => requirement_label(requirement),
        "state" => guard_state.to_string()
    )
    .increment(1);

    match guard_state.rendering() {
        Rendering::RedirectToSignIn => Redirect::to(&state.config().sign_in_path).into_response(),
        Rendering::DenialNotice => denial_notice(),
        Rendering::Content => {
            if let SessionState::Determined(Some(principal)) = session {
                tracing::debug!(uid = %principal.uid, state = %guard_state, "Route guard passed");
                request.extensions_mut().insert(principal);
            }
            next.run(request).await
        }
        Rendering::Wait => {
            tracing::error!(state = %guard_state, "Route guard did not settle");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

fn requirement_label(requirement: RouteRequirement) -> &'static str {
    match requirement {
        RouteRequirement::Authenticated => "authenticated",
        RouteRequirement::Administrator => "administrator",
    }
}

/// Explicit denial for signed-in principals that are not administrators
fn denial_notice() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": "You do not have permission to access this page",
        })),
    )
        .into_response()
}
