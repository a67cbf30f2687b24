//! Throttled/cached fetch helper
//!
//! Wraps an arbitrary fetch future so repeated invocations within a
//! configured interval return a cached result instead of re-issuing the
//! network call. The cache cell is owned by whichever component constructs
//! the throttle; there is no process-wide state.

use std::time::{Duration, Instant};

use common::error::Result;
use std::future::Future;
use tokio::sync::Mutex;
use tracing::warn;

/// Default minimum time between live invocations
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Cached value plus the time of the last successful fetch
#[derive(Debug, Clone)]
struct CacheSlot<T> {
    value: T,
    fetched_at: Instant,
}

/// A rate-limited cache cell around an async fetch operation
///
/// Failure policy is stale-over-error: when a fetch fails and a cached
/// value exists, the stale value is returned and the failure is logged;
/// when no cached value exists yet, the failure propagates.
pub struct Throttle<T> {
    interval: Duration,
    slot: Mutex<Option<CacheSlot<T>>>,
}

impl<T: Clone> Throttle<T> {
    /// Create a throttle with the given minimum interval between fetches
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value, or invoke `fetch` when the cache is empty
    /// or older than the interval
    ///
    /// The cache lock is held across the fetch, so concurrent callers
    /// coalesce onto a single upstream request.
    pub async fn run<F, Fut>(&self, fetch: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if cached.fetched_at.elapsed() < self.interval {
                return Ok(cached.value.clone());
            }
        }

        match fetch().await {
            Ok(value) => {
                *slot = Some(CacheSlot {
                    value: value.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(value)
            }
            Err(e) => match slot.as_ref() {
                // Serve the stale value rather than surfacing the failure
                Some(cached) => {
                    warn!("Throttled fetch failed, serving stale value: {}", e);
                    Ok(cached.value.clone())
                }
                None => Err(e),
            },
        }
    }
}
