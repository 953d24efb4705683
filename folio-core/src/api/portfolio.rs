//! Portfolio API handler

use crate::api::SuccessResponse;
use crate::error::Result;
use crate::middleware::AuthPrincipal;
use crate::service::PortfolioSelection;
use crate::state::HasServices;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

/// Assemble the caller's portfolio with the chosen template and style
pub async fn get<S: HasServices>(
    State(state): State<S>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(selection): Query<PortfolioSelection>,
) -> Result<impl IntoResponse> {
    let portfolio = state.portfolio_service().own(&principal, &selection).await?;
    Ok(Json(SuccessResponse::new(portfolio)))
}
