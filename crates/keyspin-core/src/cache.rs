//! In-memory cache for resolved lookup records.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{LookupKey, LookupRecord};

/// Thread-safe key-to-record cache.
///
/// Only complete records are memoized, so a key that so far produced only
/// "Unknown" answers stays eligible for provider retries. Entries live for
/// the process lifetime; there is no eviction.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    inner: Arc<tokio::sync::RwLock<HashMap<LookupKey, LookupRecord>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached record for a key, if any.
    pub async fn get(&self, key: &LookupKey) -> Option<LookupRecord> {
        let store = self.inner.read().await;
        store.get(key).cloned()
    }

    /// Store a record. Incomplete records are silently discarded.
    pub async fn put(&self, record: LookupRecord) {
        if !record.complete {
            return;
        }

        let mut store = self.inner.write().await;
        store.insert(record.key.clone(), record);
    }

    /// Number of cached records.
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every cached record.
    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.clear();
    }
}
