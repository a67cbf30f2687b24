//! Market-data adapter layer
//!
//! Fetches raw price/trade data from public market-data providers
//! (CoinGecko, Binance, CoinCap, Alternative.me) over REST and WebSocket,
//! normalizes every provider-specific payload into the canonical record
//! shapes in `common::model`, and exposes the results behind the
//! [`MarketFeed`] trait consumed by the API gateway.

pub mod providers;
pub mod stream;
pub mod throttle;
pub mod poller;

mod feed;
mod simulated;
mod service;

pub use feed::{FeedKind, LiveFeed, MarketFeed};
pub use poller::{PollHandle, SnapshotPoller};
pub use providers::{ProviderKind, SnapshotProvider};
pub use service::MarketDataService;
pub use simulated::SimulatedFeed;
pub use throttle::Throttle;
