//! Market feed abstraction
//!
//! The full outbound capability consumed by the API gateway, behind one
//! trait so the live providers can be swapped for the simulated feed (in
//! tests, or when upstream providers are unavailable).

use std::sync::Arc;

use async_trait::async_trait;
use common::error::{ErrorExt, Result};
use common::model::history::HistoryPoint;
use common::model::market::{AltcoinMarket, BitcoinStats};
use common::model::sentiment::FearGreedIndex;
use common::model::snapshot::MarketSnapshot;
use common::model::trade::TradeRecord;
use tracing::info;

use crate::providers::{Alternative, Binance, CoinGecko, ProviderKind, SnapshotProvider};
use crate::simulated::SimulatedFeed;

/// Source of every dataset served to the frontend
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Current Bitcoin market snapshot
    async fn snapshot(&self) -> Result<MarketSnapshot>;

    /// Extended Bitcoin dashboard statistics
    async fn stats(&self) -> Result<BitcoinStats>;

    /// 30-day daily market chart, oldest-first
    async fn history(&self) -> Result<Vec<HistoryPoint>>;

    /// Top altcoin market entries ordered by market cap
    async fn altcoins(&self) -> Result<Vec<AltcoinMarket>>;

    /// Most recent trades, newest-first
    async fn recent_trades(&self, limit: usize) -> Result<Vec<TradeRecord>>;

    /// Latest Fear & Greed index reading
    async fn sentiment(&self) -> Result<FearGreedIndex>;
}

/// Feed selection
pub enum FeedKind {
    /// Live upstream providers
    Live(ProviderKind),
    /// Synthetic data generator
    Simulated,
}

impl FeedKind {
    /// Build the selected feed
    pub fn build(self) -> Arc<dyn MarketFeed> {
        match self {
            FeedKind::Live(provider) => Arc::new(LiveFeed::new(provider)),
            FeedKind::Simulated => {
                info!("Using simulated market data");
                Arc::new(SimulatedFeed::new())
            }
        }
    }
}

/// Feed backed by the real upstream providers
///
/// All adapters share one HTTP client; the snapshot provider variant is
/// chosen once at construction and used for every snapshot call.
pub struct LiveFeed {
    coingecko: CoinGecko,
    binance: Binance,
    alternative: Alternative,
    snapshot_provider: Arc<dyn SnapshotProvider>,
}

impl LiveFeed {
    /// Create a live feed with the given snapshot provider variant
    pub fn new(provider: ProviderKind) -> Self {
        let client = reqwest::Client::new();
        Self {
            coingecko: CoinGecko::new(client.clone()),
            binance: Binance::new(client.clone()),
            alternative: Alternative::new(client.clone()),
            snapshot_provider: provider.build(client),
        }
    }
}

impl Default for LiveFeed {
    fn default() -> Self {
        Self::new(ProviderKind::default())
    }
}

#[async_trait]
impl MarketFeed for LiveFeed {
    async fn snapshot(&self) -> Result<MarketSnapshot> {
        self.snapshot_provider.fetch_snapshot().await
    }

    async fn stats(&self) -> Result<BitcoinStats> {
        self.coingecko
            .coin_stats()
            .await
            .with_context(|| "Failed to fetch bitcoin statistics")
    }

    async fn history(&self) -> Result<Vec<HistoryPoint>> {
        self.coingecko
            .market_chart()
            .await
            .with_context(|| "Failed to fetch market chart")
    }

    async fn altcoins(&self) -> Result<Vec<AltcoinMarket>> {
        self.coingecko
            .markets()
            .await
            .with_context(|| "Failed to fetch altcoin listing")
    }

    async fn recent_trades(&self, limit: usize) -> Result<Vec<TradeRecord>> {
        self.binance
            .recent_trades(limit)
            .await
            .with_context(|| format!("Failed to fetch {} recent trades", limit))
    }

    async fn sentiment(&self) -> Result<FearGreedIndex> {
        self.alternative
            .fear_greed()
            .await
            .with_context(|| "Failed to fetch fear & greed index")
    }
}
