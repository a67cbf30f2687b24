//! Market snapshot model

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// A single point-in-time Bitcoin market reading
///
/// Constructed fresh on every successful adapter call or streaming message;
/// consumers simply replace their previous snapshot with the latest one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct MarketSnapshot {
    /// Last/current trade price in USD
    pub price: f64,
    /// 24-hour traded volume, denominated in USD
    pub volume: f64,
    /// 24-hour percentage price change (signed)
    pub change: f64,
}
