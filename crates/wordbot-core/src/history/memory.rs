// # Memory History Store
//
// In-memory implementation of HistoryStore.
//
// ## Purpose
//
// Same contract as the file store without durability. Useful for tests
// and for embedding the bot where history lives elsewhere.
//
// ## Crash Behavior
//
// - All history is lost when the process exits
// - `save()` and `mark_used()` always "persist" successfully

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::history_store::{HistoryStore, MarkOutcome};
use crate::types::History;

/// In-memory history store
///
/// Clones share the same underlying history, so a test can keep a handle
/// while the store itself is boxed into a `ContentManager`.
///
/// # Example
///
/// ```rust,no_run
/// use wordbot_core::history::MemoryHistoryStore;
/// use wordbot_core::traits::HistoryStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = MemoryHistoryStore::new();
///     store.mark_used("bandwidth").await;
///     store.mark_used("bandwidth").await;
///     assert_eq!(store.snapshot().await.len(), 1);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    inner: Arc<RwLock<History>>,
}

impl MemoryHistoryStore {
    /// Create a new empty memory history store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `history`
    pub fn with_history(history: History) -> Self {
        Self {
            inner: Arc::new(RwLock::new(history)),
        }
    }

    /// Get the number of words in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self) -> History {
        self.inner.read().await.clone()
    }

    async fn save(&self, history: &History) -> Result<(), Error> {
        *self.inner.write().await = history.clone();
        Ok(())
    }

    async fn snapshot(&self) -> History {
        self.inner.read().await.clone()
    }

    async fn mark_used(&self, word: &str) -> MarkOutcome {
        if self.inner.write().await.push_unique(word) {
            MarkOutcome::Appended { persisted: true }
        } else {
            MarkOutcome::AlreadyPresent
        }
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
