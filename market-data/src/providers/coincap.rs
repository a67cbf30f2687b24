//! CoinCap adapter
//!
//! Snapshot provider variant backed by the CoinCap assets endpoint.

use async_trait::async_trait;
use common::error::{Error, Result};
use common::model::snapshot::MarketSnapshot;
use serde::Deserialize;

use super::{check_non_negative, get_json, parse_number, SnapshotProvider};

const PROVIDER: &str = "coincap";
const DEFAULT_BASE_URL: &str = "https://api.coincap.io";

/// CoinCap REST client
#[derive(Debug, Clone)]
pub struct CoinCap {
    client: reqwest::Client,
    base_url: String,
}

impl CoinCap {
    /// Create a new CoinCap adapter over a shared HTTP client
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Fetch the current Bitcoin snapshot from the assets endpoint
    pub async fn asset(&self) -> Result<MarketSnapshot> {
        let url = format!("{}/v2/assets/bitcoin", self.base_url);
        let body: AssetResponse = get_json(&self.client, PROVIDER, &url).await?;
        snapshot_from_asset(body)
    }
}

#[async_trait]
impl SnapshotProvider for CoinCap {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        self.asset().await
    }
}

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// Response body of the assets endpoint
#[derive(Debug, Deserialize)]
pub struct AssetResponse {
    pub data: Option<AssetData>,
}

/// Asset payload (fields we consume); CoinCap quotes numbers as strings
#[derive(Debug, Deserialize)]
pub struct AssetData {
    #[serde(rename = "priceUsd")]
    pub price_usd: String,
    #[serde(rename = "volumeUsd24Hr")]
    pub volume_usd_24hr: String,
    #[serde(rename = "changePercent24Hr")]
    pub change_percent_24hr: String,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Map an assets response into the canonical snapshot
pub fn snapshot_from_asset(body: AssetResponse) -> Result<MarketSnapshot> {
    let data = body
        .data
        .ok_or_else(|| Error::upstream_schema(PROVIDER, "missing data entry"))?;

    let price = parse_number(PROVIDER, "data.priceUsd", &data.price_usd)?;
    let volume = parse_number(PROVIDER, "data.volumeUsd24Hr", &data.volume_usd_24hr)?;
    let change = parse_number(PROVIDER, "data.changePercent24Hr", &data.change_percent_24hr)?;

    Ok(MarketSnapshot {
        price: check_non_negative(PROVIDER, "data.priceUsd", price)?,
        volume: check_non_negative(PROVIDER, "data.volumeUsd24Hr", volume)?,
        change,
    })
}
