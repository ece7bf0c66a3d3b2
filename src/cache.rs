//! The published refresh result.
//!
//! A single [`CacheWriter`] (owned by the refresh scheduler) swaps whole
//! [`CacheState`] values into a watch channel; any number of [`CacheReader`]s observe
//! either the previous or the new state, never a partially written one.

use std::sync::Arc;

use tokio::sync::watch;

use crate::snapshot::{Snapshot, now_millis};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheState {
    /// Last successfully built snapshot, kept when later refreshes fail.
    pub snapshot: Option<Arc<Snapshot>>,
    /// Error of the last refresh, `None` when it succeeded.
    pub error: Option<String>,
    /// Epoch millis of the last refresh attempt.
    pub last_update: Option<i64>,
}

impl CacheState {
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}

/// `None` until the first refresh cycle completed.
type Slot = Option<Arc<CacheState>>;

pub fn channel() -> (CacheWriter, CacheReader) {
    let (tx, rx) = watch::channel(None);
    (CacheWriter { tx }, CacheReader { rx })
}

#[derive(Debug)]
pub struct CacheWriter {
    tx: watch::Sender<Slot>,
}

impl CacheWriter {
    /// Replace the snapshot and clear any previous error.
    pub fn publish_snapshot(&self, snapshot: Snapshot) -> Arc<CacheState> {
        self.publish(CacheState {
            snapshot: Some(Arc::new(snapshot)),
            error: None,
            last_update: Some(now_millis()),
        })
    }

    /// Record a failed refresh, keeping the last good snapshot if there is one.
    pub fn publish_error(&self, error: impl Into<String>) -> Arc<CacheState> {
        let previous = self
            .tx
            .borrow()
            .as_ref()
            .and_then(|state| state.snapshot.clone());

        self.publish(CacheState {
            snapshot: previous,
            error: Some(error.into()),
            last_update: Some(now_millis()),
        })
    }

    fn publish(&self, state: CacheState) -> Arc<CacheState> {
        let state = Arc::new(state);
        self.tx.send_replace(Some(state.clone()));
        state
    }
}

#[derive(Debug, Clone)]
pub struct CacheReader {
    rx: watch::Receiver<Slot>,
}

impl CacheReader {
    /// Latest published state, `None` before the first refresh completed.
    pub fn current(&self) -> Option<Arc<CacheState>> {
        self.rx.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait for the first refresh to complete. Returns `None` if the writer is gone
    /// without ever publishing.
    pub async fn wait_ready(&mut self) -> Option<Arc<CacheState>> {
        self.rx
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|state| state.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testutils::{FakeIcons, FakeRiotApi, settings};
    use crate::snapshot::SnapshotBuilder;

    async fn snapshot() -> Snapshot {
        SnapshotBuilder::new(Arc::new(FakeRiotApi::new()), Arc::new(FakeIcons), settings())
            .build()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn reader_is_not_ready_before_first_publish() {
        let (writer, reader) = channel();

        assert!(!reader.is_ready());
        assert!(reader.current().is_none());

        writer.publish_snapshot(snapshot().await);

        assert!(reader.is_ready());
        assert!(reader.current().unwrap().ok());
    }

    #[tokio::test]
    async fn error_keeps_previous_snapshot() {
        let (writer, reader) = channel();
        let published = writer.publish_snapshot(snapshot().await);

        writer.publish_error("Riot API error: 503 - unavailable");

        let state = reader.current().unwrap();
        assert!(!state.ok());
        assert_eq!(state.error.as_deref(), Some("Riot API error: 503 - unavailable"));
        assert!(Arc::ptr_eq(
            state.snapshot.as_ref().unwrap(),
            published.snapshot.as_ref().unwrap()
        ));
    }

    #[tokio::test]
    async fn error_before_any_snapshot_is_published() {
        let (writer, reader) = channel();

        writer.publish_error("boom");

        let state = reader.current().unwrap();
        assert!(state.snapshot.is_none());
        assert!(state.last_update.is_some());
    }

    #[tokio::test]
    async fn success_clears_error() {
        let (writer, reader) = channel();
        writer.publish_error("boom");

        writer.publish_snapshot(snapshot().await);

        let state = reader.current().unwrap();
        assert!(state.ok());
        assert!(state.snapshot.is_some());
    }

    #[tokio::test]
    async fn wait_ready_resolves_on_first_publish() {
        let (writer, mut reader) = channel();

        let waiter = tokio::spawn(async move { reader.wait_ready().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        writer.publish_error("first cycle failed");

        let state = waiter.await.unwrap().unwrap();
        assert_eq!(state.error.as_deref(), Some("first cycle failed"));
    }

    #[tokio::test]
    async fn wait_ready_gives_up_when_writer_is_dropped() {
        let (writer, mut reader) = channel();
        drop(writer);

        assert!(reader.wait_ready().await.is_none());
    }
}
