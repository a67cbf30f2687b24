use common::error::Error;
use common::model::trade::Side;
use market_data::stream::{snapshot_from_ticker_event, trade_from_event, TickerEvent, TradeEvent};
use serde_json::json;

#[test]
fn test_ticker_event_mapping() {
    let event: TickerEvent = serde_json::from_value(json!({
        "e": "24hrTicker",
        "s": "BTCUSDT",
        "c": "67000",
        "v": "1000",
        "P": "2.5"
    }))
    .unwrap();

    // Base-asset volume is converted to USD with the last price
    let snapshot = snapshot_from_ticker_event(event).unwrap();
    assert_eq!(snapshot.price, 67000.0);
    assert_eq!(snapshot.volume, 67_000_000.0);
    assert_eq!(snapshot.change, 2.5);
}

#[test]
fn test_ticker_event_unparsable_volume() {
    let event: TickerEvent = serde_json::from_value(json!({
        "c": "67000",
        "v": "garbage",
        "P": "2.5"
    }))
    .unwrap();

    assert!(matches!(
        snapshot_from_ticker_event(event).unwrap_err(),
        Error::UpstreamSchema(_)
    ));
}

#[test]
fn test_trade_event_mapping_buyer_maker() {
    let event: TradeEvent = serde_json::from_value(json!({
        "e": "trade",
        "p": "67000.10",
        "q": "0.002",
        "m": true,
        "T": 1700000000000i64
    }))
    .unwrap();

    // Buyer was the maker, so the aggressing taker sold
    let trade = trade_from_event(event).unwrap();
    assert_eq!(trade.price, 67000.10);
    assert_eq!(trade.quantity, 0.002);
    assert_eq!(trade.side, Side::Sell);
    assert_eq!(trade.time, 1700000000000);
}

#[test]
fn test_trade_event_mapping_seller_maker() {
    let event: TradeEvent = serde_json::from_value(json!({
        "p": "67000.10",
        "q": "0.002",
        "m": false,
        "T": 1700000000000i64
    }))
    .unwrap();

    let trade = trade_from_event(event).unwrap();
    assert_eq!(trade.side, Side::Buy);
}

#[test]
fn test_side_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Side::Sell).unwrap(), json!("sell"));
    assert_eq!(serde_json::to_value(Side::Buy).unwrap(), json!("buy"));
}
