//! Account settings handler

use crate::api::SuccessResponse;
use crate::domain::UpdateAccountInput;
use crate::error::Result;
use crate::middleware::AuthPrincipal;
use crate::state::HasServices;
use axum::{extract::State, response::IntoResponse, Json};

/// Update display name, email or password. The response carries a new
/// session token when the email or password changed.
pub async fn update<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(input): Json<UpdateAccountInput>,
) -> Result<impl IntoResponse> {
    let account = state.account_service().update(&principal, input).await?;
    Ok(Json(SuccessResponse::new(account)))
}
