//! Bitcoin API handlers
//!
//! Handlers for the Bitcoin endpoints:
//! - Current market snapshot (price/volume/change)
//! - Extended dashboard statistics
//! - 30-day market chart

use std::sync::Arc;

use axum::{extract::State, Json};
use common::model::history::HistoryPoint;
use common::model::market::BitcoinStats;
use common::model::snapshot::MarketSnapshot;

use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

/// Get the current Bitcoin market snapshot
#[utoipa::path(
    get,
    path = "/api/v1/bitcoin",
    responses(
        (status = 200, description = "Current snapshot retrieved successfully", body = MarketSnapshot),
        (status = 500, description = "Upstream provider failure", body = ErrorResponse)
    ),
    tag = "bitcoin"
)]
pub async fn get_bitcoin(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MarketSnapshot>, ApiError> {
    // Fetch the snapshot from the configured provider
    let snapshot = state.market_data_service.snapshot().await?;

    Ok(Json(snapshot))
}

/// Get extended Bitcoin dashboard statistics
#[utoipa::path(
    get,
    path = "/api/v1/bitcoin/stats",
    responses(
        (status = 200, description = "Statistics retrieved successfully", body = BitcoinStats),
        (status = 500, description = "Upstream provider failure", body = ErrorResponse)
    ),
    tag = "bitcoin"
)]
pub async fn get_bitcoin_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BitcoinStats>, ApiError> {
    let stats = state.market_data_service.stats().await?;

    Ok(Json(stats))
}

/// Get the 30-day Bitcoin market chart
#[utoipa::path(
    get,
    path = "/api/v1/bitcoin/history",
    responses(
        (status = 200, description = "Market chart retrieved successfully", body = [HistoryPoint]),
        (status = 500, description = "Upstream provider failure", body = ErrorResponse)
    ),
    tag = "bitcoin"
)]
pub async fn get_bitcoin_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HistoryPoint>>, ApiError> {
    // Served through an hourly cache; see MarketDataService
    let history = state.market_data_service.history().await?;

    Ok(Json(history))
}
