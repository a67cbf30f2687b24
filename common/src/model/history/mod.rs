//! Historical market chart models

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// One day of the Bitcoin market chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct HistoryPoint {
    /// Sample time in epoch milliseconds
    pub time: i64,
    /// Price in USD
    pub price: f64,
    /// Traded volume in USD
    pub volume: f64,
    /// Market capitalization in USD
    pub market_cap: f64,
}
