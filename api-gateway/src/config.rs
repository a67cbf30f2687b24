//! Application configuration

use std::env;

use market_data::{FeedKind, ProviderKind};
use tracing::warn;

/// Application configuration
pub struct AppConfig {
    /// API port used when no listen address is given on the command line
    pub port: u16,
    /// Serve synthetic data instead of hitting upstream providers
    pub simulated: bool,
    /// Snapshot provider variant for the live feed
    pub provider: ProviderKind,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        let provider = match env::var("SNAPSHOT_PROVIDER") {
            Ok(name) => name.parse().unwrap_or_else(|e| {
                warn!("{}; falling back to the default provider", e);
                ProviderKind::default()
            }),
            Err(_) => ProviderKind::default(),
        };

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            simulated: env::var("FEED")
                .map(|f| f.eq_ignore_ascii_case("simulated"))
                .unwrap_or(false),
            provider,
        }
    }

    /// Feed selection derived from this configuration
    pub fn feed_kind(&self) -> FeedKind {
        if self.simulated {
            FeedKind::Simulated
        } else {
            FeedKind::Live(self.provider)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
