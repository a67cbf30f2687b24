//! Error types for the market-data backend
//!
//! This module provides a unified error handling system for all crates in
//! the workspace. It defines the failure taxonomy for upstream market-data
//! providers (transport, HTTP status, schema, stream) and provides
//! consistent error conversion.

use std::fmt::Display;
use thiserror::Error;

/// Market-data backend error type
#[derive(Debug, Error)]
pub enum Error {
    /// Network/DNS/TLS failure while talking to an upstream provider
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream provider responded with a non-2xx HTTP status
    #[error("Upstream HTTP error: {provider} responded with status {status}")]
    UpstreamHttp {
        /// Provider the request was issued against
        provider: String,
        /// HTTP status code returned
        status: u16,
    },

    /// Upstream JSON was present but missing/mistyped expected fields
    #[error("Upstream schema error: {0}")]
    UpstreamSchema(String),

    /// WebSocket-level error on a streaming connection
    #[error("Stream error: {0}")]
    Stream(#[from] tokio_tungstenite::tungstenite::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Construct an `UpstreamHttp` error for a provider/status pair
    pub fn upstream_http(provider: impl Into<String>, status: u16) -> Self {
        Error::UpstreamHttp {
            provider: provider.into(),
            status,
        }
    }

    /// Construct an `UpstreamSchema` error with provider context
    pub fn upstream_schema(provider: &str, detail: impl Display) -> Self {
        Error::UpstreamSchema(format!("{}: {}", provider, detail))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::UpstreamSchema(msg) => {
                    Error::UpstreamSchema(format!("{}: {}", context, msg))
                }
                Error::ValidationError(msg) => {
                    Error::ValidationError(format!("{}: {}", context, msg))
                }
                Error::ConfigurationError(msg) => {
                    Error::ConfigurationError(format!("{}: {}", context, msg))
                }
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                // Wrapped source errors keep their original payload
                Error::Transport(e) => Error::Transport(e),
                Error::UpstreamHttp { provider, status } => {
                    Error::UpstreamHttp { provider, status }
                }
                Error::Stream(e) => Error::Stream(e),
                Error::Serialization(e) => Error::Serialization(e),
            }
        })
    }
}

/// Convert string messages into an error
impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Internal(message)
    }
}

/// Convert static string references into an error
impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Internal(message.to_string())
    }
}
