//! Upstream provider adapters
//!
//! One module per provider. Every adapter issues a single GET request,
//! validates the HTTP status and JSON shape, and maps provider-specific
//! fields into the canonical records in `common::model`. No adapter
//! retries; retry is the caller's polling-loop concern.

pub mod alternative;
pub mod binance;
pub mod coincap;
pub mod coingecko;

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use common::error::{Error, Result};
use common::model::snapshot::MarketSnapshot;
use serde::de::DeserializeOwned;

pub use alternative::Alternative;
pub use binance::Binance;
pub use coincap::CoinCap;
pub use coingecko::{CoinGecko, CoinGeckoCoin};

/// A provider capable of producing a current Bitcoin market snapshot
///
/// The providers are functionally redundant alternatives, not a fan-out
/// aggregation: production code instantiates exactly one of them, chosen
/// by [`ProviderKind`].
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Short provider name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Fetch the current snapshot from the provider
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot>;
}

/// Snapshot provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// CoinGecko simple-price endpoint (default)
    CoinGeckoSimple,
    /// CoinGecko full coin endpoint
    CoinGeckoCoin,
    /// Binance 24h ticker endpoint
    Binance,
    /// CoinCap asset endpoint
    CoinCap,
}

impl ProviderKind {
    /// Build the snapshot provider for this kind over a shared HTTP client
    pub fn build(self, client: reqwest::Client) -> Arc<dyn SnapshotProvider> {
        match self {
            ProviderKind::CoinGeckoSimple => Arc::new(CoinGecko::new(client)),
            ProviderKind::CoinGeckoCoin => Arc::new(CoinGeckoCoin::new(CoinGecko::new(client))),
            ProviderKind::Binance => Arc::new(Binance::new(client)),
            ProviderKind::CoinCap => Arc::new(CoinCap::new(client)),
        }
    }
}

impl Default for ProviderKind {
    fn default() -> Self {
        ProviderKind::CoinGeckoSimple
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "coingecko" | "coingecko-simple" => Ok(ProviderKind::CoinGeckoSimple),
            "coingecko-coin" => Ok(ProviderKind::CoinGeckoCoin),
            "binance" => Ok(ProviderKind::Binance),
            "coincap" => Ok(ProviderKind::CoinCap),
            other => Err(Error::ConfigurationError(format!(
                "Unknown snapshot provider: {}",
                other
            ))),
        }
    }
}

/// Issue a GET request and decode the JSON body
///
/// Non-2xx statuses become `UpstreamHttp`; a body that fails to decode into
/// the expected shape becomes `UpstreamSchema`; connection failures surface
/// as `Transport` through the `From<reqwest::Error>` conversion.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    provider: &'static str,
    url: &str,
) -> Result<T> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::upstream_http(provider, status.as_u16()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| Error::upstream_schema(provider, e))
}

/// Parse a provider numeric string into an `f64`
pub(crate) fn parse_number(provider: &'static str, field: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>().map_err(|_| {
        Error::upstream_schema(provider, format!("field {} is not numeric: {:?}", field, raw))
    })
}

/// Validate a price/volume value: finite and non-negative
pub(crate) fn check_non_negative(provider: &'static str, field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::upstream_schema(
            provider,
            format!("field {} out of range: {}", field, value),
        ))
    }
}
