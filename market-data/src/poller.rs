//! Cancellable snapshot polling task
//!
//! Replaces fire-and-forget interval timers with an explicit task: a
//! handle returned on start exposes a single cancellation operation, and
//! the latest snapshot is published through a watch channel (last write
//! wins, which is all the consumers care about).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::model::snapshot::MarketSnapshot;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::providers::SnapshotProvider;

/// Handle to a running snapshot poller
///
/// Cancellation consumes the handle, so it can only happen once; dropping
/// the handle without calling [`cancel`](PollHandle::cancel) also stops
/// the task.
pub struct PollHandle {
    stop: oneshot::Sender<()>,
    alive: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop the polling task and suppress any in-flight emission
    pub fn cancel(self) {
        // Gate first so a fetch resolving after teardown cannot publish
        self.alive.store(false, Ordering::SeqCst);
        let _ = self.stop.send(());
        self.task.abort();
    }
}

/// Fixed-interval snapshot poller
pub struct SnapshotPoller;

impl SnapshotPoller {
    /// Spawn a poller over the given provider
    ///
    /// Ticks are scheduled from tick start, not fetch completion, so a slow
    /// provider can produce overlapping in-flight requests; whichever
    /// response arrives last wins. Failed polls are logged and leave the
    /// previously published value in place.
    pub fn spawn(
        provider: Arc<dyn SnapshotProvider>,
        interval: Duration,
    ) -> (PollHandle, watch::Receiver<Option<MarketSnapshot>>) {
        let (tx, rx) = watch::channel(None);
        let tx = Arc::new(tx);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let alive = Arc::new(AtomicBool::new(true));

        let task_alive = alive.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let provider = provider.clone();
                        let tx = tx.clone();
                        let alive = task_alive.clone();

                        tokio::spawn(async move {
                            match provider.fetch_snapshot().await {
                                Ok(snapshot) if alive.load(Ordering::SeqCst) => {
                                    let _ = tx.send(Some(snapshot));
                                }
                                Ok(_) => {
                                    debug!("Dropping snapshot fetched after cancellation");
                                }
                                Err(e) => {
                                    warn!("Snapshot poll against {} failed: {}", provider.name(), e);
                                }
                            }
                        });
                    }
                }
            }

            debug!("Snapshot poller stopped");
        });

        (
            PollHandle {
                stop: stop_tx,
                alive,
                task,
            },
            rx,
        )
    }
}
