//! Market models and related types

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Normalized altcoin market entry
///
/// Only `id`, `symbol` and `name` are promoted to typed fields; the
/// remaining provider market fields (current price, market cap, rank, ...)
/// are passed through verbatim for the frontend to pick over.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct AltcoinMarket {
    /// Provider coin identifier (e.g., "ethereum")
    pub id: String,
    /// Ticker symbol (e.g., "eth")
    pub symbol: String,
    /// Display name (e.g., "Ethereum")
    pub name: String,
    /// Remaining provider market fields, passed through verbatim
    #[serde(flatten)]
    #[cfg_attr(feature = "utoipa", schema(value_type = Object))]
    pub market_fields: serde_json::Map<String, serde_json::Value>,
}

/// Extended Bitcoin market statistics for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct BitcoinStats {
    /// Current price in USD
    pub price: f64,
    /// 24h price change percent
    pub change_percent_24h: Option<f64>,
    /// Market capitalization in USD
    pub market_cap: Option<f64>,
    /// 24h traded volume in USD
    pub volume: Option<f64>,
    /// 24h high price
    pub high_24h: Option<f64>,
    /// 24h low price
    pub low_24h: Option<f64>,
    /// All-time high price
    pub ath: Option<f64>,
    /// All-time high date (provider ISO-8601 string)
    pub ath_date: Option<String>,
    /// Circulating supply in BTC
    pub circulating_supply: Option<f64>,
    /// Total supply in BTC
    pub total_supply: Option<f64>,
    /// Maximum supply in BTC
    pub max_supply: Option<f64>,
    /// Market cap rank
    pub market_cap_rank: Option<u32>,
    /// Last update time (provider ISO-8601 string)
    pub last_updated: Option<String>,
}
