// api-gateway/src/lib.rs
pub mod api;
pub mod error;
pub mod config;
pub mod ws;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use market_data::MarketDataService;

use crate::api::{
    altcoins::get_altcoins,
    bitcoin::{get_bitcoin, get_bitcoin_history, get_bitcoin_stats},
    sentiment::get_sentiment,
    trades::get_transactions,
};
use crate::ws::handler::ws_handler;

/// App state shared across handlers
pub struct AppState {
    /// Market data service
    pub market_data_service: Arc<MarketDataService>,
}

/// Build the application router over the given state
///
/// Kept out of `main` so the integration tests can drive the exact same
/// route table without binding a socket.
pub fn app(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Bitcoin routes
        .route("/bitcoin", get(get_bitcoin))
        .route("/bitcoin/stats", get(get_bitcoin_stats))
        .route("/bitcoin/history", get(get_bitcoin_history))

        // Market routes
        .route("/altcoins", get(get_altcoins))
        .route("/transactions", get(get_transactions))
        .route("/sentiment", get(get_sentiment));

    // Set up websocket route
    let ws_routes = Router::new().route("/ws", get(ws_handler));

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(ws_routes)
        .with_state(state)
}
