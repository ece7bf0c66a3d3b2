use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error, info, instrument};

use crate::cache::CacheWriter;
use crate::snapshot::SnapshotBuilder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new snapshot replaced the cached one.
    Published,
    /// The cycle failed, the previous snapshot was kept alongside this error.
    Failed(String),
    /// Another cycle was still in flight, nothing was done.
    Skipped,
}

/// Periodically rebuilds the snapshot and publishes it, one cycle at a time.
pub struct RefreshScheduler {
    builder: SnapshotBuilder,
    cache: CacheWriter,
    period: Duration,
    /// Single permit held for the duration of a cycle.
    in_flight: Semaphore,
}

impl RefreshScheduler {
    pub fn new(builder: SnapshotBuilder, cache: CacheWriter, period: Duration) -> Self {
        Self {
            builder,
            cache,
            period,
            in_flight: Semaphore::new(1),
        }
    }

    #[cfg(test)]
    fn is_refreshing(&self) -> bool {
        self.in_flight.available_permits() == 0
    }

    #[instrument(skip_all)]
    pub async fn refresh_once(&self) -> RefreshOutcome {
        let Ok(_permit) = self.in_flight.try_acquire() else {
            debug!("🔄 Refresh already in flight, skipping");
            return RefreshOutcome::Skipped;
        };

        match self.builder.build().await {
            Ok(snapshot) => {
                info!(
                    rank = %snapshot.rank.display,
                    matches = snapshot.matches.len(),
                    session_games = snapshot.session.games,
                    "🔄 ✅ Snapshot published"
                );
                self.cache.publish_snapshot(snapshot);
                RefreshOutcome::Published
            }
            Err(e) => {
                error!(
                    error = %e,
                    status = ?e.status(),
                    upstream = e.is_upstream(),
                    "🔄 ❌ Refresh cycle failed"
                );
                let message = e.to_string();
                self.cache.publish_error(message.clone());
                RefreshOutcome::Failed(message)
            }
        }
    }

    /// Refresh once right away, then every period. Cycles never overlap: a cycle
    /// outlasting the period delays the next one.
    pub async fn run(self) {
        info!(period_secs = self.period.as_secs(), "🔄 Refresh scheduler started");

        self.refresh_once().await;

        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.refresh_once().await;
        }
    }

    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
