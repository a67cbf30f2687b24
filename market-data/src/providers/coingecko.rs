//! CoinGecko adapter
//!
//! Covers the four CoinGecko endpoints the frontend relies on: the
//! simple-price snapshot (the default snapshot provider), the full coin
//! endpoint (dashboard statistics), the coins/markets listing (altcoins)
//! and the 30-day market chart (history).

use async_trait::async_trait;
use common::error::{Error, Result};
use common::model::history::HistoryPoint;
use common::model::market::{AltcoinMarket, BitcoinStats};
use common::model::snapshot::MarketSnapshot;
use serde::Deserialize;
use tracing::debug;

use super::{check_non_negative, get_json, SnapshotProvider};

const PROVIDER: &str = "coingecko";
const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";

/// Number of altcoin market entries requested per page
const MARKETS_PER_PAGE: u32 = 50;

/// Days of daily history requested from the market chart
const HISTORY_DAYS: u32 = 30;

/// CoinGecko REST client
#[derive(Debug, Clone)]
pub struct CoinGecko {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGecko {
    /// Create a new CoinGecko adapter over a shared HTTP client
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Fetch the current Bitcoin snapshot from the simple-price endpoint
    pub async fn simple_price(&self) -> Result<MarketSnapshot> {
        let url = format!(
            "{}/api/v3/simple/price?ids=bitcoin&vs_currencies=usd&include_24hr_vol=true&include_24hr_change=true",
            self.base_url
        );
        let body: SimplePriceResponse = get_json(&self.client, PROVIDER, &url).await?;
        snapshot_from_simple_price(body)
    }

    /// Fetch extended Bitcoin statistics from the coin endpoint
    pub async fn coin_stats(&self) -> Result<BitcoinStats> {
        let url = format!("{}/api/v3/coins/bitcoin", self.base_url);
        let body: CoinDetailResponse = get_json(&self.client, PROVIDER, &url).await?;
        stats_from_coin_detail(body)
    }

    /// Fetch the current Bitcoin snapshot from the coin endpoint
    pub async fn coin_snapshot(&self) -> Result<MarketSnapshot> {
        let url = format!("{}/api/v3/coins/bitcoin", self.base_url);
        let body: CoinDetailResponse = get_json(&self.client, PROVIDER, &url).await?;
        snapshot_from_coin_detail(body)
    }

    /// Fetch the top altcoin market entries ordered by market cap
    pub async fn markets(&self) -> Result<Vec<AltcoinMarket>> {
        let url = format!(
            "{}/api/v3/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={}&page=1&sparkline=false",
            self.base_url, MARKETS_PER_PAGE
        );
        let markets: Vec<AltcoinMarket> = get_json(&self.client, PROVIDER, &url).await?;
        debug!("Fetched {} altcoin market entries", markets.len());
        Ok(markets)
    }

    /// Fetch the 30-day daily market chart
    pub async fn market_chart(&self) -> Result<Vec<HistoryPoint>> {
        let url = format!(
            "{}/api/v3/coins/bitcoin/market_chart?vs_currency=usd&days={}&interval=daily",
            self.base_url, HISTORY_DAYS
        );
        let body: MarketChartResponse = get_json(&self.client, PROVIDER, &url).await?;
        history_from_market_chart(body)
    }
}

#[async_trait]
impl SnapshotProvider for CoinGecko {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        self.simple_price().await
    }
}

/// Snapshot provider variant backed by the full coin endpoint
#[derive(Debug, Clone)]
pub struct CoinGeckoCoin {
    inner: CoinGecko,
}

impl CoinGeckoCoin {
    /// Wrap a CoinGecko adapter as a coin-endpoint snapshot provider
    pub fn new(inner: CoinGecko) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl SnapshotProvider for CoinGeckoCoin {
    fn name(&self) -> &'static str {
        "coingecko-coin"
    }

    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        self.inner.coin_snapshot().await
    }
}

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// Response body of the simple-price endpoint
#[derive(Debug, Deserialize)]
pub struct SimplePriceResponse {
    /// Present only when the requested coin id exists
    pub bitcoin: Option<SimplePriceEntry>,
}

/// Per-coin entry of the simple-price endpoint
#[derive(Debug, Deserialize)]
pub struct SimplePriceEntry {
    pub usd: Option<f64>,
    pub usd_24h_vol: Option<f64>,
    pub usd_24h_change: Option<f64>,
}

/// Response body of the coin endpoint (fields we consume)
#[derive(Debug, Deserialize)]
pub struct CoinDetailResponse {
    pub market_cap_rank: Option<u32>,
    pub market_data: Option<CoinMarketData>,
    pub last_updated: Option<String>,
}

/// `market_data` section of the coin endpoint
#[derive(Debug, Default, Deserialize)]
pub struct CoinMarketData {
    #[serde(default)]
    pub current_price: UsdQuote,
    #[serde(default)]
    pub total_volume: UsdQuote,
    #[serde(default)]
    pub market_cap: UsdQuote,
    #[serde(default)]
    pub high_24h: UsdQuote,
    #[serde(default)]
    pub low_24h: UsdQuote,
    #[serde(default)]
    pub ath: UsdQuote,
    #[serde(default)]
    pub ath_date: UsdText,
    pub price_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
}

/// A per-currency numeric quote map, narrowed to USD
#[derive(Debug, Default, Deserialize)]
pub struct UsdQuote {
    pub usd: Option<f64>,
}

/// A per-currency string map, narrowed to USD
#[derive(Debug, Default, Deserialize)]
pub struct UsdText {
    pub usd: Option<String>,
}

/// Response body of the market-chart endpoint
///
/// Each series is a list of `[epoch_ms, value]` pairs; the three series are
/// index-aligned.
#[derive(Debug, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<(f64, f64)>,
    pub market_caps: Vec<(f64, f64)>,
    pub total_volumes: Vec<(f64, f64)>,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Map a simple-price response into the canonical snapshot
pub fn snapshot_from_simple_price(body: SimplePriceResponse) -> Result<MarketSnapshot> {
    let entry = body
        .bitcoin
        .ok_or_else(|| Error::upstream_schema(PROVIDER, "missing bitcoin entry"))?;

    let price = entry
        .usd
        .ok_or_else(|| Error::upstream_schema(PROVIDER, "missing bitcoin.usd"))?;
    let volume = entry
        .usd_24h_vol
        .ok_or_else(|| Error::upstream_schema(PROVIDER, "missing bitcoin.usd_24h_vol"))?;
    let change = entry
        .usd_24h_change
        .ok_or_else(|| Error::upstream_schema(PROVIDER, "missing bitcoin.usd_24h_change"))?;

    Ok(MarketSnapshot {
        price: check_non_negative(PROVIDER, "bitcoin.usd", price)?,
        volume: check_non_negative(PROVIDER, "bitcoin.usd_24h_vol", volume)?,
        change,
    })
}

/// Map a coin-endpoint response into the canonical snapshot
pub fn snapshot_from_coin_detail(body: CoinDetailResponse) -> Result<MarketSnapshot> {
    let market_data = body
        .market_data
        .ok_or_else(|| Error::upstream_schema(PROVIDER, "missing market_data"))?;

    let price = market_data
        .current_price
        .usd
        .ok_or_else(|| Error::upstream_schema(PROVIDER, "missing market_data.current_price.usd"))?;
    let volume = market_data
        .total_volume
        .usd
        .ok_or_else(|| Error::upstream_schema(PROVIDER, "missing market_data.total_volume.usd"))?;
    let change = market_data.price_change_percentage_24h.ok_or_else(|| {
        Error::upstream_schema(PROVIDER, "missing market_data.price_change_percentage_24h")
    })?;

    Ok(MarketSnapshot {
        price: check_non_negative(PROVIDER, "market_data.current_price.usd", price)?,
        volume: check_non_negative(PROVIDER, "market_data.total_volume.usd", volume)?,
        change,
    })
}

/// Map a coin-endpoint response into the extended dashboard statistics
pub fn stats_from_coin_detail(body: CoinDetailResponse) -> Result<BitcoinStats> {
    let market_data = body
        .market_data
        .ok_or_else(|| Error::upstream_schema(PROVIDER, "missing market_data"))?;

    let price = market_data
        .current_price
        .usd
        .ok_or_else(|| Error::upstream_schema(PROVIDER, "missing market_data.current_price.usd"))?;

    Ok(BitcoinStats {
        price: check_non_negative(PROVIDER, "market_data.current_price.usd", price)?,
        change_percent_24h: market_data.price_change_percentage_24h,
        market_cap: market_data.market_cap.usd,
        volume: market_data.total_volume.usd,
        high_24h: market_data.high_24h.usd,
        low_24h: market_data.low_24h.usd,
        ath: market_data.ath.usd,
        ath_date: market_data.ath_date.usd,
        circulating_supply: market_data.circulating_supply,
        total_supply: market_data.total_supply,
        max_supply: market_data.max_supply,
        market_cap_rank: body.market_cap_rank,
        last_updated: body.last_updated,
    })
}

/// Map a market-chart response into the canonical history series
///
/// Provider order (oldest-first) is preserved; the volume and market-cap
/// series must be index-aligned with the price series.
pub fn history_from_market_chart(body: MarketChartResponse) -> Result<Vec<HistoryPoint>> {
    let mut points = Vec::with_capacity(body.prices.len());

    for (i, (time_ms, price)) in body.prices.iter().enumerate() {
        let volume = body
            .total_volumes
            .get(i)
            .map(|(_, v)| *v)
            .ok_or_else(|| Error::upstream_schema(PROVIDER, "total_volumes shorter than prices"))?;
        let market_cap = body
            .market_caps
            .get(i)
            .map(|(_, v)| *v)
            .ok_or_else(|| Error::upstream_schema(PROVIDER, "market_caps shorter than prices"))?;

        points.push(HistoryPoint {
            time: *time_ms as i64,
            price: *price,
            volume,
            market_cap,
        });
    }

    Ok(points)
}
