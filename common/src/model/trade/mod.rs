//! Trade models and related types

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Trade side (buy or sell), attributed to the aggressing taker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Derive the taker side from a provider's maker flag.
    ///
    /// When the buyer was the maker, the aggressing taker sold, so the
    /// flag inverts: `is_buyer_maker == true` means `Sell`.
    pub fn from_buyer_maker(is_buyer_maker: bool) -> Self {
        if is_buyer_maker {
            Side::Sell
        } else {
            Side::Buy
        }
    }
}

/// A single executed trade from a public trade feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct TradeRecord {
    /// Execution price in USD
    pub price: f64,
    /// Trade size in the base asset (BTC)
    pub quantity: f64,
    /// Side of the aggressing taker
    pub side: Side,
    /// Execution time in epoch milliseconds
    pub time: i64,
}
