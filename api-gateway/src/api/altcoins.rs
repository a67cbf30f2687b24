//! Altcoin API handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use common::model::market::AltcoinMarket;

use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

/// Get the top altcoin market entries
#[utoipa::path(
    get,
    path = "/api/v1/altcoins",
    responses(
        (status = 200, description = "Altcoin listing retrieved successfully", body = [AltcoinMarket]),
        (status = 500, description = "Upstream provider failure", body = ErrorResponse)
    ),
    tag = "market"
)]
pub async fn get_altcoins(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AltcoinMarket>>, ApiError> {
    // Served through an hourly cache; see MarketDataService
    let coins = state.market_data_service.altcoins().await?;

    Ok(Json(coins))
}
