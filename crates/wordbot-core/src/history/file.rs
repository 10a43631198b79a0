// # File History Store
//
// File-based implementation of HistoryStore.
//
// ## File Format
//
// A pretty-printed JSON array of used words, oldest first:
//
// ```json
// [
//   "Enshittification",
//   "Bandwidth"
// ]
// ```
//
// ## Failure Handling
//
// - Missing file: empty history
// - Unreadable or corrupt file (including non-string entries): logged, empty history
// - Failed write: logged, never retried; `save` also returns the error
//
// ## Writes
//
// The whole list is rewritten on every save: serialized to a temporary
// file next to the target and renamed over it.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::history_store::{HistoryStore, MarkOutcome};
use crate::types::History;

/// File-based history store
///
/// # Example
///
/// ```rust,no_run
/// use wordbot_core::history::FileHistoryStore;
/// use wordbot_core::traits::HistoryStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = FileHistoryStore::open("data/history.json").await;
///
///     // Appends and writes to disk
///     store.mark_used("Enshittification").await;
///
///     assert!(store.snapshot().await.contains("Enshittification"));
/// }
/// ```
#[derive(Debug)]
pub struct FileHistoryStore {
    path: PathBuf,
    history: RwLock<History>,
}

impl FileHistoryStore {
    /// Open a history file, loading its current contents
    ///
    /// Never fails: a missing or corrupt file yields an empty history.
    /// The file itself is only created on the first save.
    pub async fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let history = Self::read_or_empty(&path).await;

        tracing::debug!(
            "Opened history file {} ({} words)",
            path.display(),
            history.len()
        );

        Self {
            path,
            history: RwLock::new(history),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, swallowing (and logging) every error
    async fn read_or_empty(path: &Path) -> History {
        match Self::read_file(path).await {
            Ok(history) => history,
            Err(e) => {
                tracing::error!("Error loading history: {}. Starting with empty history.", e);
                History::new()
            }
        }
    }

    /// Read and parse the history file
    async fn read_file(path: &Path) -> Result<History, Error> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            tracing::debug!("History file does not exist: {}", path.display());
            return Ok(History::new());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::history_store(format!(
                "Failed to read history file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::history_store(format!(
                "Failed to parse history file {}: {}. File may be corrupted.",
                path.display(),
                e
            ))
        })
    }

    /// Serialize `history` and atomically replace the file
    async fn write_file(&self, history: &History) -> Result<(), Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !fs::try_exists(parent).await.unwrap_or(false)
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::history_store(format!(
                    "Failed to create history directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(history)
            .map_err(|e| Error::history_store(format!("Failed to serialize history: {}", e)))?;

        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::history_store(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(json.as_bytes()).await.map_err(|e| {
                Error::history_store(format!(
                    "Failed to write to temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::history_store(format!(
                    "Failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::history_store(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!("History written to file: {}", self.path.display());
        Ok(())
    }

    /// Get path to temporary file for atomic writes
    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self) -> History {
        let history = Self::read_or_empty(&self.path).await;
        *self.history.write().await = history.clone();
        history
    }

    async fn save(&self, history: &History) -> Result<(), Error> {
        if let Err(e) = self.write_file(history).await {
            tracing::error!("Error saving history: {}", e);
            return Err(e);
        }
        *self.history.write().await = history.clone();
        Ok(())
    }

    async fn snapshot(&self) -> History {
        self.history.read().await.clone()
    }

    async fn mark_used(&self, word: &str) -> MarkOutcome {
        let updated = {
            let mut guard = self.history.write().await;
            if !guard.push_unique(word) {
                tracing::debug!("'{}' is already in history, nothing to do", word);
                return MarkOutcome::AlreadyPresent;
            }
            guard.clone()
        };

        // Immediate write for durability
        match self.write_file(&updated).await {
            Ok(()) => MarkOutcome::Appended { persisted: true },
            Err(e) => {
                tracing::error!("Error saving history: {}", e);
                MarkOutcome::Appended { persisted: false }
            }
        }
    }

    fn store_name(&self) -> &'static str {
        "file"
    }
}
