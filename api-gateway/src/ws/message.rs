//! WebSocket messages

use serde::{Deserialize, Serialize};

/// WebSocket request message
#[derive(Debug, Deserialize)]
pub struct WsRequest {
    /// Request ID
    pub id: String,
    /// Method
    pub method: String,
    /// Params
    #[serde(default)]
    pub params: serde_json::Value,
}

/// WebSocket response message
#[derive(Debug, Serialize)]
pub struct WsResponse {
    /// Request ID
    pub id: String,
    /// Result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<WsError>,
}

impl WsResponse {
    /// Successful response carrying a result payload
    pub fn ok(id: String, result: serde_json::Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }
}

/// WebSocket error
#[derive(Debug, Serialize)]
pub struct WsError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
}

/// WebSocket notification message
#[derive(Debug, Serialize)]
pub struct WsNotification {
    /// Method
    pub method: String,
    /// Params
    pub params: serde_json::Value,
}
