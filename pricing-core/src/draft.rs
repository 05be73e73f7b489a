//! Draft autosave
//!
//! The batch-under-construction persists to a durable store on a
//! trailing-edge debounce window so an operator closing the tab mid-edit
//! loses at most a second of work. Storage mechanics are behind
//! [`DraftStore`]; this module only owns the debounce contract: a new edit
//! resets the timer, and only the latest snapshot is ever written.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::Batch;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Default trailing-edge debounce window
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Error)]
#[error("draft store failure: {0}")]
pub struct DraftStoreError(pub String);

/// Persisted draft snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftRecord {
    /// Unix millis at snapshot time
    pub saved_at: i64,
    pub batch: Batch,
}

impl DraftRecord {
    pub fn now(batch: Batch) -> Self {
        Self {
            saved_at: chrono::Utc::now().timestamp_millis(),
            batch,
        }
    }
}

/// Durable draft storage (external collaborator)
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn save(&self, record: &DraftRecord) -> Result<(), DraftStoreError>;
    async fn load(&self) -> Result<Option<DraftRecord>, DraftStoreError>;
    async fn clear(&self) -> Result<(), DraftStoreError>;
}

/// Debounced autosave in front of a [`DraftStore`]
///
/// Requires a tokio runtime: each `schedule` spawns a timer task that is
/// aborted by the next edit, so at most one write is pending at any time.
pub struct DraftAutosave {
    store: Arc<dyn DraftStore>,
    debounce: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DraftAutosave {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self::with_debounce(store, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(store: Arc<dyn DraftStore>, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            pending: Mutex::new(None),
        }
    }

    /// Schedule a write of the current batch state. Any previously pending
    /// write is cancelled; only this latest snapshot will be stored once the
    /// debounce window elapses without further edits.
    pub fn schedule(&self, batch: &Batch) {
        let record = DraftRecord::now(batch.clone());
        let store = Arc::clone(&self.store);
        let debounce = self.debounce;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if let Err(err) = store.save(&record).await {
                tracing::warn!(error = %err, "draft autosave failed");
            }
        });

        if let Some(prev) = self.swap_pending(Some(handle)) {
            prev.abort();
        }
    }

    /// Write the current state immediately, cancelling any pending timer.
    /// Used before navigation away from the editor.
    pub async fn flush(&self, batch: &Batch) -> Result<(), DraftStoreError> {
        self.cancel();
        self.store.save(&DraftRecord::now(batch.clone())).await
    }

    /// Cancel any pending write without persisting
    pub fn cancel(&self) {
        if let Some(prev) = self.swap_pending(None) {
            prev.abort();
        }
    }

    /// Load the persisted draft, if one survives from an earlier session
    pub async fn restore(&self) -> Result<Option<DraftRecord>, DraftStoreError> {
        self.store.load().await
    }

    fn swap_pending(&self, next: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *pending, next)
    }
}

impl Drop for DraftAutosave {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BatchService, CategoryChoice};
    use tokio::sync::Mutex as AsyncMutex;

    /// In-memory store counting writes, for debounce assertions
    #[derive(Default)]
    pub(crate) struct MemoryDraftStore {
        record: AsyncMutex<Option<DraftRecord>>,
        saves: std::sync::atomic::AtomicUsize,
    }

    impl MemoryDraftStore {
        async fn current(&self) -> Option<DraftRecord> {
            self.record.lock().await.clone()
        }

        fn save_count(&self) -> usize {
            self.saves.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DraftStore for MemoryDraftStore {
        async fn save(&self, record: &DraftRecord) -> Result<(), DraftStoreError> {
            *self.record.lock().await = Some(record.clone());
            self.saves
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }

        async fn load(&self) -> Result<Option<DraftRecord>, DraftStoreError> {
            Ok(self.record.lock().await.clone())
        }

        async fn clear(&self) -> Result<(), DraftStoreError> {
            *self.record.lock().await = None;
            Ok(())
        }
    }

    fn batch_named(name: &str) -> Batch {
        let mut batch = Batch::new(CategoryChoice::Existing { id: 1 });
        batch.services.push(BatchService::new(name));
        batch
    }

    #[tokio::test]
    async fn test_debounce_writes_only_latest_state() {
        let store = Arc::new(MemoryDraftStore::default());
        let autosave = DraftAutosave::with_debounce(store.clone(), Duration::from_millis(30));

        autosave.schedule(&batch_named("first"));
        autosave.schedule(&batch_named("second"));
        autosave.schedule(&batch_named("third"));

        tokio::time::sleep(Duration::from_millis(120)).await;

        // Earlier snapshots were superseded before their timers fired
        assert_eq!(store.save_count(), 1);
        let saved = store.current().await.unwrap();
        assert_eq!(saved.batch.services[0].name, "third");
    }

    #[tokio::test]
    async fn test_edit_resets_timer() {
        let store = Arc::new(MemoryDraftStore::default());
        let autosave = DraftAutosave::with_debounce(store.clone(), Duration::from_millis(200));

        autosave.schedule(&batch_named("first"));
        // Edit again before the window elapses
        tokio::time::sleep(Duration::from_millis(100)).await;
        autosave.schedule(&batch_named("second"));
        // Original window has now passed, but the rearmed one has not
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(store.save_count(), 0);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(store.save_count(), 1);
        assert_eq!(
            store.current().await.unwrap().batch.services[0].name,
            "second"
        );
    }

    #[tokio::test]
    async fn test_flush_writes_immediately_and_cancels_timer() {
        let store = Arc::new(MemoryDraftStore::default());
        let autosave = DraftAutosave::with_debounce(store.clone(), Duration::from_millis(500));

        autosave.schedule(&batch_named("pending"));
        autosave.flush(&batch_named("flushed")).await.unwrap();

        assert_eq!(store.save_count(), 1);
        assert_eq!(
            store.current().await.unwrap().batch.services[0].name,
            "flushed"
        );

        // The cancelled timer never fires
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_cancel_discards_pending_write() {
        let store = Arc::new(MemoryDraftStore::default());
        let autosave = DraftAutosave::with_debounce(store.clone(), Duration::from_millis(30));

        autosave.schedule(&batch_named("doomed"));
        autosave.cancel();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_round_trips_record() {
        let store = Arc::new(MemoryDraftStore::default());
        let autosave = DraftAutosave::with_debounce(store.clone(), Duration::from_millis(10));

        assert!(autosave.restore().await.unwrap().is_none());

        let batch = batch_named("draft");
        autosave.flush(&batch).await.unwrap();
        let restored = autosave.restore().await.unwrap().unwrap();
        assert_eq!(restored.batch, batch);
    }
}
