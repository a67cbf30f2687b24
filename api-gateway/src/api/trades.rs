//! Trade API handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use common::model::trade::TradeRecord;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorResponse};
use crate::AppState;

/// Largest trade window a client may request
const MAX_TRADES_LIMIT: usize = 100;

/// Trades query parameters
#[derive(Debug, Deserialize, ToSchema)]
pub struct TradesQuery {
    /// Number of most recent trades to return
    #[serde(default = "default_trades_limit")]
    pub limit: usize,
}

fn default_trades_limit() -> usize {
    15
}

/// Get the most recent trades, newest-first
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    params(
        ("limit" = Option<usize>, Query, description = "Maximum number of trades to return (1-100)")
    ),
    responses(
        (status = 200, description = "Trades retrieved successfully", body = [TradeRecord]),
        (status = 400, description = "Invalid limit", body = ErrorResponse),
        (status = 500, description = "Upstream provider failure", body = ErrorResponse)
    ),
    tag = "market"
)]
pub async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TradesQuery>,
) -> Result<Json<Vec<TradeRecord>>, ApiError> {
    // Validate the requested window
    if query.limit == 0 || query.limit > MAX_TRADES_LIMIT {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_TRADES_LIMIT
        )));
    }

    // Get recent trades from the market data service
    let trades = state.market_data_service.recent_trades(query.limit).await?;

    Ok(Json(trades))
}
