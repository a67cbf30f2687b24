//! Market data service implementation

use std::sync::Arc;
use std::time::Duration;

use common::error::Result;
use common::model::history::HistoryPoint;
use common::model::market::{AltcoinMarket, BitcoinStats};
use common::model::sentiment::FearGreedIndex;
use common::model::snapshot::MarketSnapshot;
use common::model::trade::TradeRecord;

use crate::feed::{FeedKind, MarketFeed};
use crate::providers::ProviderKind;
use crate::throttle::Throttle;

/// Cache window for the slow-moving datasets (altcoin listing, market
/// chart, sentiment index); matches the hourly revalidation the providers
/// suggest for them
const SLOW_DATASET_INTERVAL: Duration = Duration::from_secs(3600);

/// Service facade over a market feed
///
/// Snapshot, stats and trades pass through to the feed on every call; the
/// slow-moving datasets are served through per-dataset [`Throttle`] cells
/// owned by this service.
pub struct MarketDataService {
    /// Underlying feed
    feed: Arc<dyn MarketFeed>,
    /// Cached altcoin listing
    altcoins_cache: Throttle<Vec<AltcoinMarket>>,
    /// Cached market chart
    history_cache: Throttle<Vec<HistoryPoint>>,
    /// Cached sentiment reading
    sentiment_cache: Throttle<FearGreedIndex>,
}

impl MarketDataService {
    /// Create a service over the default live feed
    pub fn new() -> Self {
        Self::with_feed(FeedKind::Live(ProviderKind::default()).build())
    }

    /// Create a service over a specific feed
    pub fn with_feed(feed: Arc<dyn MarketFeed>) -> Self {
        Self {
            feed,
            altcoins_cache: Throttle::new(SLOW_DATASET_INTERVAL),
            history_cache: Throttle::new(SLOW_DATASET_INTERVAL),
            sentiment_cache: Throttle::new(SLOW_DATASET_INTERVAL),
        }
    }

    /// Get the current Bitcoin snapshot
    pub async fn snapshot(&self) -> Result<MarketSnapshot> {
        self.feed.snapshot().await
    }

    /// Get the extended Bitcoin dashboard statistics
    pub async fn stats(&self) -> Result<BitcoinStats> {
        self.feed.stats().await
    }

    /// Get the 30-day market chart (cached for an hour)
    pub async fn history(&self) -> Result<Vec<HistoryPoint>> {
        let feed = self.feed.clone();
        self.history_cache
            .run(|| async move { feed.history().await })
            .await
    }

    /// Get the altcoin market listing (cached for an hour)
    pub async fn altcoins(&self) -> Result<Vec<AltcoinMarket>> {
        let feed = self.feed.clone();
        self.altcoins_cache
            .run(|| async move { feed.altcoins().await })
            .await
    }

    /// Get the most recent trades, newest-first
    pub async fn recent_trades(&self, limit: usize) -> Result<Vec<TradeRecord>> {
        self.feed.recent_trades(limit).await
    }

    /// Get the latest Fear & Greed reading (cached for an hour)
    pub async fn sentiment(&self) -> Result<FearGreedIndex> {
        let feed = self.feed.clone();
        self.sentiment_cache
            .run(|| async move { feed.sentiment().await })
            .await
    }
}

impl Default for MarketDataService {
    fn default() -> Self {
        Self::new()
    }
}
