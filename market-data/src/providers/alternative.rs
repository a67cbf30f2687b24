//! Alternative.me adapter
//!
//! Fetches the crypto Fear & Greed index used by the sentiment meter.

use common::error::{Error, Result};
use common::model::sentiment::FearGreedIndex;
use serde::Deserialize;

use super::{get_json, parse_number};

const PROVIDER: &str = "alternative.me";
const DEFAULT_BASE_URL: &str = "https://api.alternative.me";

/// Alternative.me REST client
#[derive(Debug, Clone)]
pub struct Alternative {
    client: reqwest::Client,
    base_url: String,
}

impl Alternative {
    /// Create a new Alternative.me adapter over a shared HTTP client
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Fetch the latest Fear & Greed index reading
    pub async fn fear_greed(&self) -> Result<FearGreedIndex> {
        let url = format!("{}/fng/", self.base_url);
        let body: FngResponse = get_json(&self.client, PROVIDER, &url).await?;
        index_from_fng(body)
    }
}

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// Response body of the /fng/ endpoint
#[derive(Debug, Deserialize)]
pub struct FngResponse {
    #[serde(default)]
    pub data: Vec<FngEntry>,
}

/// One Fear & Greed reading; all fields are quoted as strings
#[derive(Debug, Deserialize)]
pub struct FngEntry {
    pub value: String,
    pub value_classification: String,
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Map a /fng/ response into the canonical index reading
///
/// The endpoint returns a list; only the most recent entry (first) is used.
pub fn index_from_fng(body: FngResponse) -> Result<FearGreedIndex> {
    let entry = body
        .data
        .into_iter()
        .next()
        .ok_or_else(|| Error::upstream_schema(PROVIDER, "empty data list"))?;

    let value = parse_number(PROVIDER, "value", &entry.value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(Error::upstream_schema(
            PROVIDER,
            format!("value out of range: {}", value),
        ));
    }

    let timestamp = entry.timestamp.parse::<i64>().map_err(|_| {
        Error::upstream_schema(
            PROVIDER,
            format!("timestamp is not numeric: {:?}", entry.timestamp),
        )
    })?;

    Ok(FearGreedIndex {
        value: value as u32,
        classification: entry.value_classification,
        timestamp,
    })
}
