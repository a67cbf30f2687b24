//! Binance adapter
//!
//! REST side of the Binance integration: the 24h ticker (snapshot provider
//! variant) and the recent-trades listing. The streaming side shares these
//! conventions and lives in `crate::stream`.

use async_trait::async_trait;
use common::error::Result;
use common::model::snapshot::MarketSnapshot;
use common::model::trade::{Side, TradeRecord};
use serde::Deserialize;
use tracing::debug;

use super::{check_non_negative, get_json, parse_number, SnapshotProvider};

const PROVIDER: &str = "binance";
const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Trading pair every Binance request is issued against
pub const SYMBOL: &str = "BTCUSDT";

/// Default number of recent trades requested per poll
pub const DEFAULT_TRADE_LIMIT: usize = 15;

/// Binance REST client
#[derive(Debug, Clone)]
pub struct Binance {
    client: reqwest::Client,
    base_url: String,
}

impl Binance {
    /// Create a new Binance adapter over a shared HTTP client
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Fetch the current snapshot from the 24h ticker endpoint
    pub async fn ticker_24h(&self) -> Result<MarketSnapshot> {
        let url = format!("{}/api/v3/ticker/24hr?symbol={}", self.base_url, SYMBOL);
        let body: Ticker24hResponse = get_json(&self.client, PROVIDER, &url).await?;
        snapshot_from_ticker_24h(body)
    }

    /// Fetch the most recent trades, newest-first per API convention
    ///
    /// There is no dedup against a previous poll; overlapping 15-trade
    /// windows across consecutive polls are accepted behavior.
    pub async fn recent_trades(&self, limit: usize) -> Result<Vec<TradeRecord>> {
        let url = format!(
            "{}/api/v3/trades?symbol={}&limit={}",
            self.base_url, SYMBOL, limit
        );
        let body: Vec<RestTrade> = get_json(&self.client, PROVIDER, &url).await?;
        let trades = trades_from_rest(body)?;
        debug!("Fetched {} recent trades", trades.len());
        Ok(trades)
    }
}

#[async_trait]
impl SnapshotProvider for Binance {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        self.ticker_24h().await
    }
}

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// Response body of the 24h ticker endpoint (fields we consume)
///
/// Binance quotes all numeric fields as strings.
#[derive(Debug, Deserialize)]
pub struct Ticker24hResponse {
    /// Last trade price
    #[serde(rename = "lastPrice")]
    pub last_price: String,
    /// 24h volume in the quote asset (already USD-quoted)
    #[serde(rename = "quoteVolume")]
    pub quote_volume: String,
    /// 24h percent price change
    #[serde(rename = "priceChangePercent")]
    pub price_change_percent: String,
}

/// One element of the recent-trades endpoint
#[derive(Debug, Deserialize)]
pub struct RestTrade {
    pub price: String,
    pub qty: String,
    #[serde(rename = "isBuyerMaker")]
    pub is_buyer_maker: bool,
    /// Execution time in epoch milliseconds
    pub time: i64,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Map a 24h ticker response into the canonical snapshot
pub fn snapshot_from_ticker_24h(body: Ticker24hResponse) -> Result<MarketSnapshot> {
    let price = parse_number(PROVIDER, "lastPrice", &body.last_price)?;
    let volume = parse_number(PROVIDER, "quoteVolume", &body.quote_volume)?;
    let change = parse_number(PROVIDER, "priceChangePercent", &body.price_change_percent)?;

    Ok(MarketSnapshot {
        price: check_non_negative(PROVIDER, "lastPrice", price)?,
        volume: check_non_negative(PROVIDER, "quoteVolume", volume)?,
        change,
    })
}

/// Map a recent-trades response into canonical trade records
///
/// Provider order is preserved. The maker flag inverts into the taker side
/// via [`Side::from_buyer_maker`].
pub fn trades_from_rest(body: Vec<RestTrade>) -> Result<Vec<TradeRecord>> {
    body.into_iter().map(trade_from_rest).collect()
}

fn trade_from_rest(trade: RestTrade) -> Result<TradeRecord> {
    Ok(TradeRecord {
        price: parse_number(PROVIDER, "price", &trade.price)?,
        quantity: parse_number(PROVIDER, "qty", &trade.qty)?,
        side: Side::from_buyer_maker(trade.is_buyer_maker),
        time: trade.time,
    })
}
