//! Binance WebSocket streaming adapters
//!
//! Pull-based subscriptions over the public ticker and trade streams. Each
//! stream object owns exactly one connection; the subscriber that opens it
//! is responsible for closing it exactly once (or dropping it, which
//! releases the transport). There is no automatic reconnect here;
//! reconnection, if desired, is the owning component's lifecycle concern.

use common::error::Result;
use common::model::snapshot::MarketSnapshot;
use common::model::trade::{Side, TradeRecord};
use futures::StreamExt;
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, warn};

use crate::providers::binance::SYMBOL;
use crate::providers::{check_non_negative, parse_number};

const PROVIDER: &str = "binance-ws";
const DEFAULT_WS_BASE: &str = "wss://stream.binance.com:9443/ws";

type WsConnection = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Read frames until the next text payload
///
/// Control frames are skipped; a close frame (or an exhausted transport)
/// ends the stream; protocol errors are logged and surfaced to the caller,
/// which may keep reading until the peer closes.
async fn next_text(ws: &mut WsConnection, stream: &'static str) -> Option<Result<String>> {
    while let Some(frame) = ws.next().await {
        match frame {
            Ok(Message::Text(text)) => return Some(Ok(text)),
            Ok(Message::Close(_)) => {
                debug!("{} stream closed by server", stream);
                return None;
            }
            // Ping/pong/binary frames carry no ticker data
            Ok(_) => continue,
            Err(e) => {
                error!("{} stream error: {}", stream, e);
                return Some(Err(e.into()));
            }
        }
    }
    None
}

/// Streaming snapshot subscription over the 24h ticker stream
///
/// Each inbound message yields at most one snapshot; only the latest value
/// matters to consumers, so there is no buffering.
pub struct TickerStream {
    ws: WsConnection,
}

impl TickerStream {
    /// Connect and subscribe to the BTC/USDT ticker stream
    pub async fn connect() -> Result<Self> {
        let url = format!("{}/{}@ticker", DEFAULT_WS_BASE, SYMBOL.to_lowercase());
        let (ws, _) = connect_async(&url).await?;
        debug!("Connected to {}", url);
        Ok(Self { ws })
    }

    /// Await the next snapshot; `None` once the connection is closed
    ///
    /// Malformed frames are logged and skipped, so a `Some(Err(_))` is
    /// always a transport-level stream error.
    pub async fn next(&mut self) -> Option<Result<MarketSnapshot>> {
        loop {
            let text = match next_text(&mut self.ws, PROVIDER).await? {
                Ok(text) => text,
                Err(e) => return Some(Err(e)),
            };

            match serde_json::from_str::<TickerEvent>(&text)
                .map_err(Into::into)
                .and_then(snapshot_from_ticker_event)
            {
                Ok(snapshot) => return Some(Ok(snapshot)),
                Err(e) => {
                    warn!("Skipping malformed ticker frame: {}", e);
                    continue;
                }
            }
        }
    }

    /// Close the subscription and release the connection
    pub async fn close(mut self) -> Result<()> {
        self.ws.close(None).await?;
        Ok(())
    }
}

/// Streaming trade subscription over the public trade stream
///
/// A pure 1:1 message-to-record mapper; any bounded most-recent-first
/// buffering is the subscriber's concern, not the adapter's.
pub struct TradeStream {
    ws: WsConnection,
}

impl TradeStream {
    /// Connect and subscribe to the BTC/USDT trade stream
    pub async fn connect() -> Result<Self> {
        let url = format!("{}/{}@trade", DEFAULT_WS_BASE, SYMBOL.to_lowercase());
        let (ws, _) = connect_async(&url).await?;
        debug!("Connected to {}", url);
        Ok(Self { ws })
    }

    /// Await the next trade; `None` once the connection is closed
    pub async fn next(&mut self) -> Option<Result<TradeRecord>> {
        loop {
            let text = match next_text(&mut self.ws, PROVIDER).await? {
                Ok(text) => text,
                Err(e) => return Some(Err(e)),
            };

            match serde_json::from_str::<TradeEvent>(&text)
                .map_err(Into::into)
                .and_then(trade_from_event)
            {
                Ok(trade) => return Some(Ok(trade)),
                Err(e) => {
                    warn!("Skipping malformed trade frame: {}", e);
                    continue;
                }
            }
        }
    }

    /// Close the subscription and release the connection
    pub async fn close(mut self) -> Result<()> {
        self.ws.close(None).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// Ticker stream event (fields we consume); numbers quoted as strings
#[derive(Debug, Deserialize)]
pub struct TickerEvent {
    /// Last trade price
    #[serde(rename = "c")]
    pub last_price: String,
    /// 24h volume in the base asset
    #[serde(rename = "v")]
    pub base_volume: String,
    /// 24h percent price change
    #[serde(rename = "P")]
    pub change_percent: String,
}

/// Trade stream event (fields we consume)
#[derive(Debug, Deserialize)]
pub struct TradeEvent {
    /// Execution price
    #[serde(rename = "p")]
    pub price: String,
    /// Trade size in the base asset
    #[serde(rename = "q")]
    pub quantity: String,
    /// Whether the buyer was the maker
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,
    /// Execution time in epoch milliseconds
    #[serde(rename = "T")]
    pub time: i64,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Map a ticker stream event into the canonical snapshot
///
/// The stream quotes 24h volume in the base asset, so it is converted to
/// USD by multiplying with the last price.
pub fn snapshot_from_ticker_event(event: TickerEvent) -> Result<MarketSnapshot> {
    let price = check_non_negative(
        PROVIDER,
        "c",
        parse_number(PROVIDER, "c", &event.last_price)?,
    )?;
    let base_volume = check_non_negative(
        PROVIDER,
        "v",
        parse_number(PROVIDER, "v", &event.base_volume)?,
    )?;
    let change = parse_number(PROVIDER, "P", &event.change_percent)?;

    Ok(MarketSnapshot {
        price,
        volume: price * base_volume,
        change,
    })
}

/// Map a trade stream event into the canonical trade record
pub fn trade_from_event(event: TradeEvent) -> Result<TradeRecord> {
    Ok(TradeRecord {
        price: parse_number(PROVIDER, "p", &event.price)?,
        quantity: parse_number(PROVIDER, "q", &event.quantity)?,
        side: Side::from_buyer_maker(event.is_buyer_maker),
        time: event.time,
    })
}
