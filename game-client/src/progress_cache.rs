use std::sync::Arc;

use tokio::sync::watch;

use game_persistence::{LocalStorageRepository, StorageError};
use game_types::ProgressRecord;

/// Last known progress record, in memory and in durable storage.
#[derive(Clone)]
pub struct ProgressCache {
    current: Arc<watch::Sender<Option<ProgressRecord>>>,
    storage: LocalStorageRepository,
}

impl ProgressCache {
    pub fn new(storage: LocalStorageRepository) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            current: Arc::new(current),
            storage,
        }
    }

    /// Seed memory from the durable copy. A failed read leaves the cache empty.
    pub async fn hydrate(&self) -> Option<ProgressRecord> {
        match self.storage.load::<ProgressRecord>().await {
            Ok(Some(record)) => {
                tracing::debug!("Hydrated progress for {}", record.game);
                self.current.send_replace(Some(record.clone()));
                Some(record)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read cached progress: {}", e);
                None
            }
        }
    }

    /// Replace the record. Memory is updated even if the durable write fails.
    pub async fn set(&self, record: ProgressRecord) -> Result<(), StorageError> {
        self.current.send_replace(Some(record.clone()));
        self.storage.save(&record).await
    }

    pub fn get(&self) -> Option<ProgressRecord> {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ProgressRecord>> {
        self.current.subscribe()
    }
}
