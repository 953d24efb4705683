//! Bearer token authentication extractors
//!
//! `AuthPrincipal` extracts the signed-in principal for handlers behind the
//! route guard.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::domain::Principal;
use crate::jwt::JwtManager;
use crate::state::HasServices;

/// Authentication errors
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No Authorization header present
    MissingToken,
    /// Invalid Authorization header format
    InvalidHeader(String),
    /// Token validation failed
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Missing authorization token",
            AuthError::InvalidHeader(_) => "Invalid authorization header",
            AuthError::InvalidToken => "Invalid or expired token",
        };

        let body = serde_json::json!({
            "error": "unauthorized",
            "message": message,
        });

        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

/// Extract the Bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Invalid header encoding".to_string()))?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AuthError::InvalidHeader("Authorization header must use Bearer scheme".to_string())
    })
}

/// The principal a request's bearer token identifies
pub fn principal_from_headers(
    headers: &HeaderMap,
    jwt_manager: &JwtManager,
) -> Result<Principal, AuthError> {
    let token = extract_bearer_token(headers)?;
    jwt_manager
        .verify_identity_token(token)
        .map(|claims| claims.principal())
        .map_err(|_| AuthError::InvalidToken)
}

/// Axum extractor for signed-in principals.
///
/// Reuses the principal the route guard already placed in the request
/// extensions when there is one.
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Principal);

impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: HasServices + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(AuthPrincipal(principal.clone()));
        }
        principal_from_headers(&parts.headers, state.jwt_manager()).map(AuthPrincipal)
    }
}
