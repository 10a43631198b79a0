// # History Store Trait
//
// Defines the interface for the ledger of words already published.
//
// ## Purpose
//
// The history store keeps the bot from re-suggesting words it already
// posted. It is a flat, append-only list:
// - Loaded once when the store is opened
// - Appended to at most once per run, after a successful post
// - Written back synchronously on every append
//
// ## Implementations
//
// - File-based: pretty-printed JSON array (`FileHistoryStore`)
// - In-memory: no durability (`MemoryHistoryStore`)
//
// ## Concurrency
//
// One process per run. Concurrent invocations sharing a history file can
// lose each other's appends; nothing here guards against that.

use async_trait::async_trait;

use crate::types::History;

/// Result of [`HistoryStore::mark_used`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The word was new and has been appended
    Appended {
        /// Whether the append reached durable storage
        persisted: bool,
    },
    /// The word was already in history (no-op)
    AlreadyPresent,
}

/// Trait for history store implementations
///
/// # Error Policy
///
/// History I/O never aborts a run:
/// - `load()` returns an empty history when the store is missing or corrupt
/// - `mark_used()` logs a failed write and reports it in [`MarkOutcome`]
/// - `save()` logs a failed write and also returns the error so that
///   direct callers can inspect it
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Read the persisted history and make it the current snapshot
    ///
    /// Returns an empty history if nothing is persisted yet or the
    /// persisted state cannot be parsed. Errors are logged, not returned.
    async fn load(&self) -> History;

    /// Overwrite the persisted history with `history`
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Written to durable storage
    /// - `Err(Error)`: Write failed (logged, not retried)
    async fn save(&self, history: &History) -> Result<(), crate::Error>;

    /// The current in-memory history
    async fn snapshot(&self) -> History;

    /// Append `word` and persist immediately, unless it is already present
    ///
    /// Idempotent: marking the same word twice leaves the history as if it
    /// had been marked once.
    async fn mark_used(&self, word: &str) -> MarkOutcome;

    /// Get the store name (for logging/debugging)
    fn store_name(&self) -> &'static str;
}
