//! Periodic background sweep for expired holds.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info};

use super::manager::TicketManager;

/// Drives [`TicketManager::sweep_expired_holds`] on a fixed interval.
///
/// On-access sweeping already keeps the service correct; this loop only
/// bounds how long expired seats can stay unreclaimed when no calls
/// arrive. It acquires the same lock as every other operation, so the
/// public contract is unchanged.
#[derive(Debug)]
pub struct HoldSweeper {
    /// The manager whose holds are swept.
    manager: Arc<TicketManager>,
    /// Sweep interval.
    interval: Duration,
}

impl HoldSweeper {
    /// Creates a sweeper over the given manager.
    pub fn new(manager: Arc<TicketManager>, interval_seconds: u64) -> Self {
        Self {
            manager,
            interval: Duration::from_secs(interval_seconds),
        }
    }

    /// Runs the sweep loop until the cancellation channel flips to `true`.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(
            interval_seconds = self.interval.as_secs(),
            "hold sweeper started"
        );

        let mut interval = time::interval(self.interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let swept = self.manager.sweep_expired_holds().await;
                    if swept > 0 {
                        debug!(swept, "background sweep reclaimed holds");
                    }
                }
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        info!("hold sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }
}
