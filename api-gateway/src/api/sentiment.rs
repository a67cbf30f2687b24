//! Sentiment API handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use common::model::sentiment::FearGreedIndex;

use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

/// Get the latest Fear & Greed index reading
#[utoipa::path(
    get,
    path = "/api/v1/sentiment",
    responses(
        (status = 200, description = "Sentiment reading retrieved successfully", body = FearGreedIndex),
        (status = 500, description = "Upstream provider failure", body = ErrorResponse)
    ),
    tag = "sentiment"
)]
pub async fn get_sentiment(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FearGreedIndex>, ApiError> {
    // Served through an hourly cache; see MarketDataService
    let index = state.market_data_service.sentiment().await?;

    Ok(Json(index))
}
