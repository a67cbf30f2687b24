//! Simulated market feed
//!
//! Synthetic data generator used when upstream providers are unavailable
//! (and by the test suite). The shapes and magnitudes mirror the live
//! datasets so the frontend keeps animating; a frontend banner marks the
//! data as simulated.

use async_trait::async_trait;
use chrono::Utc;
use common::error::Result;
use common::model::history::HistoryPoint;
use common::model::market::{AltcoinMarket, BitcoinStats};
use common::model::sentiment::FearGreedIndex;
use common::model::snapshot::MarketSnapshot;
use common::model::trade::{Side, TradeRecord};
use rand::Rng;

use crate::feed::MarketFeed;

/// Base price the generator oscillates around
const BASE_PRICE: f64 = 90_000.0;
/// Approximate circulating BTC supply
const CIRCULATING_SUPPLY: f64 = 19_857_975.0;
/// BTC max supply
const MAX_SUPPLY: f64 = 21_000_000.0;
/// All-time high used for the dashboard
const ATH: f64 = 108_786.0;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Synthetic market feed
#[derive(Debug, Default)]
pub struct SimulatedFeed;

impl SimulatedFeed {
    /// Create a new simulated feed
    pub fn new() -> Self {
        Self
    }

    fn spot_price(&self) -> f64 {
        let mut rng = rand::thread_rng();
        BASE_PRICE + rng.gen_range(-1_000.0..1_000.0)
    }

    fn daily_volume(&self, price: f64) -> f64 {
        let mut rng = rand::thread_rng();
        price * (0.1 + rng.gen_range(0.0..0.05)) * 1_000_000.0
    }
}

#[async_trait]
impl MarketFeed for SimulatedFeed {
    async fn snapshot(&self) -> Result<MarketSnapshot> {
        let price = self.spot_price();
        let volume = self.daily_volume(price);
        let change = rand::thread_rng().gen_range(-3.0..3.0);

        Ok(MarketSnapshot {
            price,
            volume,
            change,
        })
    }

    async fn stats(&self) -> Result<BitcoinStats> {
        let price = self.spot_price();
        let volume = self.daily_volume(price);
        let change = rand::thread_rng().gen_range(-3.0..3.0);

        Ok(BitcoinStats {
            price,
            change_percent_24h: Some(change),
            market_cap: Some(price * CIRCULATING_SUPPLY),
            volume: Some(volume),
            high_24h: Some(price * 1.02),
            low_24h: Some(price * 0.98),
            ath: Some(ATH),
            ath_date: Some("2025-01-20T00:00:00.000Z".to_string()),
            circulating_supply: Some(CIRCULATING_SUPPLY),
            total_supply: Some(CIRCULATING_SUPPLY),
            max_supply: Some(MAX_SUPPLY),
            market_cap_rank: Some(1),
            last_updated: Some(Utc::now().to_rfc3339()),
        })
    }

    async fn history(&self) -> Result<Vec<HistoryPoint>> {
        let now_ms = Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();
        let mut points = Vec::with_capacity(31);

        // 30 days of daily samples, oldest-first
        for day in (0..=30i64).rev() {
            let wave = (day as f64 / 5.0).sin() * 0.1 + rng.gen_range(0.0..0.05);
            let price = BASE_PRICE + wave * BASE_PRICE;

            points.push(HistoryPoint {
                time: now_ms - day * MILLIS_PER_DAY,
                price,
                volume: price * (0.1 + rng.gen_range(0.0..0.05)) * 1_000_000.0,
                market_cap: price * CIRCULATING_SUPPLY,
            });
        }

        Ok(points)
    }

    async fn altcoins(&self) -> Result<Vec<AltcoinMarket>> {
        // Fixed top-of-market roster with jittered prices
        const COINS: [(&str, &str, &str, f64); 8] = [
            ("ethereum", "eth", "Ethereum", 3_200.0),
            ("ripple", "xrp", "XRP", 2.4),
            ("solana", "sol", "Solana", 190.0),
            ("cardano", "ada", "Cardano", 0.9),
            ("dogecoin", "doge", "Dogecoin", 0.3),
            ("polkadot", "dot", "Polkadot", 6.5),
            ("chainlink", "link", "Chainlink", 22.0),
            ("litecoin", "ltc", "Litecoin", 115.0),
        ];

        let mut rng = rand::thread_rng();
        let coins = COINS
            .iter()
            .enumerate()
            .map(|(rank, &(id, symbol, name, base))| {
                let price = base * rng.gen_range(0.95..1.05);
                let mut market_fields = serde_json::Map::new();
                market_fields.insert("current_price".to_string(), serde_json::json!(price));
                market_fields.insert(
                    "market_cap".to_string(),
                    serde_json::json!(price * 1_000_000_000.0),
                );
                market_fields.insert(
                    "market_cap_rank".to_string(),
                    serde_json::json!(rank as u32 + 2),
                );
                market_fields.insert(
                    "price_change_percentage_24h".to_string(),
                    serde_json::json!(rng.gen_range(-5.0..5.0)),
                );

                AltcoinMarket {
                    id: id.to_string(),
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                    market_fields,
                }
            })
            .collect();

        Ok(coins)
    }

    async fn recent_trades(&self, limit: usize) -> Result<Vec<TradeRecord>> {
        let now_ms = Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();

        // Newest-first, one synthetic trade per second
        let trades = (0..limit)
            .map(|i| TradeRecord {
                price: BASE_PRICE + rng.gen_range(-50.0..50.0),
                quantity: rng.gen_range(0.0001..0.5),
                side: Side::from_buyer_maker(rng.gen_bool(0.5)),
                time: now_ms - i as i64 * 1_000,
            })
            .collect();

        Ok(trades)
    }

    async fn sentiment(&self) -> Result<FearGreedIndex> {
        let value = rand::thread_rng().gen_range(20..=80u32);

        Ok(FearGreedIndex {
            value,
            classification: classification(value).to_string(),
            timestamp: Utc::now().timestamp(),
        })
    }
}

/// Alternative.me-style classification buckets
fn classification(value: u32) -> &'static str {
    match value {
        0..=24 => "Extreme Fear",
        25..=44 => "Fear",
        45..=54 => "Neutral",
        55..=74 => "Greed",
        _ => "Extreme Greed",
    }
}
