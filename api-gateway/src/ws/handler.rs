//! WebSocket handler implementation
//!
//! Each client connection speaks a small JSON-RPC-style protocol:
//! `subscribe` opens a dedicated upstream Binance stream for the requested
//! channel ("ticker" or "trades") and forwards every record as a
//! notification; `unsubscribe` tears the stream down deterministically.
//! The forwarding task that opens an upstream stream is the one that
//! closes it, exactly once.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::ws::{Message, WebSocket},
    extract::WebSocketUpgrade,
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use market_data::stream::{TickerStream, TradeStream};
use serde_json::json;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::ws::message::{WsError, WsNotification, WsRequest, WsResponse};

/// Handle WebSocket connection
pub async fn ws_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(handle_socket)
}

/// Queue an outbound response; returns false when the client is gone
async fn send_response(tx: &mpsc::Sender<String>, response: WsResponse) -> bool {
    match serde_json::to_string(&response) {
        Ok(text) => tx.send(text).await.is_ok(),
        Err(e) => {
            error!("Error serializing response: {}", e);
            true
        }
    }
}

fn error_response(id: String, code: i32, message: impl Into<String>) -> WsResponse {
    WsResponse {
        id,
        result: None,
        error: Some(WsError {
            code,
            message: message.into(),
        }),
    }
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket) {
    // Client state
    let client_id = Uuid::new_v4();
    let mut subscriptions: HashMap<Uuid, oneshot::Sender<()>> = HashMap::new();

    info!("New WebSocket connection: {}", client_id);

    // Create a channel for sending messages to the client
    let (tx, mut rx) = mpsc::channel::<String>(100);

    // Split the WebSocket
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Spawn a task that forwards messages from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Err(e) = ws_sender.send(Message::Text(message)).await {
                error!("Error sending message: {}", e);
                break;
            }
        }

        // If the channel is closed or an error occurs, close the WebSocket
        let _ = ws_sender.close().await;
    });

    // Handle incoming messages
    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                debug!("Received text message: {}", text);

                // Parse the message
                let request: WsRequest = match serde_json::from_str(&text) {
                    Ok(req) => req,
                    Err(e) => {
                        let response = error_response(
                            "0".to_string(),
                            400,
                            format!("Invalid request: {}", e),
                        );
                        if !send_response(&tx, response).await {
                            break;
                        }
                        continue;
                    }
                };

                // Handle the request
                match request.method.as_str() {
                    "subscribe" => {
                        // Extract the channel
                        let channel = match request.params.get("channel").and_then(|c| c.as_str())
                        {
                            Some(channel) => channel.to_string(),
                            None => {
                                let response = error_response(
                                    request.id,
                                    400,
                                    "Missing or invalid channel parameter",
                                );
                                if !send_response(&tx, response).await {
                                    break;
                                }
                                continue;
                            }
                        };

                        // Each subscription owns its upstream stream and the
                        // stop signal that tears it down
                        let subscription_id = Uuid::new_v4();
                        let (stop_tx, stop_rx) = oneshot::channel();

                        match channel.as_str() {
                            "ticker" => {
                                tokio::spawn(run_ticker_subscription(
                                    subscription_id,
                                    tx.clone(),
                                    stop_rx,
                                ));
                            }
                            "trades" => {
                                tokio::spawn(run_trade_subscription(
                                    subscription_id,
                                    tx.clone(),
                                    stop_rx,
                                ));
                            }
                            _ => {
                                let response = error_response(
                                    request.id,
                                    400,
                                    format!("Invalid channel: {}", channel),
                                );
                                if !send_response(&tx, response).await {
                                    break;
                                }
                                continue;
                            }
                        }

                        // Store subscription
                        subscriptions.insert(subscription_id, stop_tx);

                        // Send success response
                        let response = WsResponse::ok(
                            request.id,
                            json!({
                                "subscriptionId": subscription_id,
                                "channel": channel,
                            }),
                        );
                        if !send_response(&tx, response).await {
                            break;
                        }
                    }
                    "unsubscribe" => {
                        // Extract subscription ID
                        let subscription_id = request
                            .params
                            .get("subscriptionId")
                            .and_then(|v| v.as_str())
                            .and_then(|s| Uuid::parse_str(s).ok());

                        let subscription_id = match subscription_id {
                            Some(id) => id,
                            None => {
                                let response = error_response(
                                    request.id,
                                    400,
                                    "Missing or invalid subscriptionId parameter",
                                );
                                if !send_response(&tx, response).await {
                                    break;
                                }
                                continue;
                            }
                        };

                        match subscriptions.remove(&subscription_id) {
                            Some(stop) => {
                                // Ends the forwarding task, which closes the
                                // upstream stream before exiting
                                let _ = stop.send(());

                                let response = WsResponse::ok(
                                    request.id,
                                    json!({
                                        "unsubscribed": true,
                                    }),
                                );
                                if !send_response(&tx, response).await {
                                    break;
                                }
                            }
                            None => {
                                let response =
                                    error_response(request.id, 404, "Subscription not found");
                                if !send_response(&tx, response).await {
                                    break;
                                }
                            }
                        }
                    }
                    "ping" => {
                        // Send pong response
                        let response = WsResponse::ok(
                            request.id,
                            json!({
                                "pong": chrono::Utc::now().to_rfc3339(),
                            }),
                        );
                        if !send_response(&tx, response).await {
                            break;
                        }
                    }
                    _ => {
                        // Send error for unknown method
                        let response = error_response(
                            request.id,
                            400,
                            format!("Unknown method: {}", request.method),
                        );
                        if !send_response(&tx, response).await {
                            break;
                        }
                    }
                }
            }
            Ok(Message::Close(_)) => {
                debug!("Received close message");
                break;
            }
            Err(e) => {
                error!("Error receiving message: {}", e);
                break;
            }
            _ => {}
        }
    }

    // Connection closed, clean up
    info!("WebSocket connection closed: {}", client_id);

    // Cancel send task
    send_task.abort();

    // Tear down every live subscription
    for (_, stop) in subscriptions.drain() {
        let _ = stop.send(());
    }
}

/// Forward ticker snapshots to the client until stopped
async fn run_ticker_subscription(
    subscription_id: Uuid,
    tx: mpsc::Sender<String>,
    mut stop: oneshot::Receiver<()>,
) {
    let mut stream = match TickerStream::connect().await {
        Ok(stream) => stream,
        Err(e) => {
            error!("Failed to open ticker stream for {}: {}", subscription_id, e);
            notify_stream_error(&tx, subscription_id, "ticker stream unavailable").await;
            return;
        }
    };

    loop {
        tokio::select! {
            _ = &mut stop => break,
            item = stream.next() => match item {
                Some(Ok(snapshot)) => {
                    let notification = WsNotification {
                        method: "ticker".to_string(),
                        params: json!({
                            "data": snapshot,
                            "subscription_id": subscription_id.to_string(),
                        }),
                    };

                    if tx
                        .send(serde_json::to_string(&notification).unwrap())
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                // The connection is expected to self-recover or close
                Some(Err(e)) => warn!("Ticker stream error for {}: {}", subscription_id, e),
                None => break,
            }
        }
    }

    // The subscriber that opened the stream closes it, exactly once
    if let Err(e) = stream.close().await {
        debug!("Ticker stream close for {}: {}", subscription_id, e);
    }

    debug!("Subscription handler for {} exited", subscription_id);
}

/// Forward trades to the client until stopped
async fn run_trade_subscription(
    subscription_id: Uuid,
    tx: mpsc::Sender<String>,
    mut stop: oneshot::Receiver<()>,
) {
    let mut stream = match TradeStream::connect().await {
        Ok(stream) => stream,
        Err(e) => {
            error!("Failed to open trade stream for {}: {}", subscription_id, e);
            notify_stream_error(&tx, subscription_id, "trade stream unavailable").await;
            return;
        }
    };

    loop {
        tokio::select! {
            _ = &mut stop => break,
            item = stream.next() => match item {
                Some(Ok(trade)) => {
                    let notification = WsNotification {
                        method: "trade".to_string(),
                        params: json!({
                            "data": trade,
                            "subscription_id": subscription_id.to_string(),
                        }),
                    };

                    if tx
                        .send(serde_json::to_string(&notification).unwrap())
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Some(Err(e)) => warn!("Trade stream error for {}: {}", subscription_id, e),
                None => break,
            }
        }
    }

    // The subscriber that opened the stream closes it, exactly once
    if let Err(e) = stream.close().await {
        debug!("Trade stream close for {}: {}", subscription_id, e);
    }

    debug!("Subscription handler for {} exited", subscription_id);
}

/// Notify the client that an upstream stream could not be opened
async fn notify_stream_error(tx: &mpsc::Sender<String>, subscription_id: Uuid, message: &str) {
    let notification = WsNotification {
        method: "error".to_string(),
        params: json!({
            "subscription_id": subscription_id.to_string(),
            "message": message,
        }),
    };

    if let Ok(text) = serde_json::to_string(&notification) {
        let _ = tx.send(text).await;
    }
}
