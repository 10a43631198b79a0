//! Content manager
//!
//! Ties a [`WordProvider`] to a [`HistoryStore`]: asks the provider for the
//! next word using the current history, renders the post text, and records
//! the word as used once it has been published.

use tracing::{error, info};

use crate::traits::{HistoryStore, MarkOutcome, WordProvider};
use crate::types::{History, WordRecord};

/// Orchestrates word generation and the history ledger
pub struct ContentManager {
    provider: Box<dyn WordProvider>,
    history: Box<dyn HistoryStore>,
}

impl ContentManager {
    /// Create a content manager over a provider and a history store
    pub fn new(provider: Box<dyn WordProvider>, history: Box<dyn HistoryStore>) -> Self {
        Self { provider, history }
    }

    /// Generate the next word, passing the current history to the provider
    ///
    /// Fail-fast: a provider failure is logged and returned as `None`.
    /// There is no fallback to another provider.
    pub async fn get_next_word(&self) -> Option<WordRecord> {
        let history = self.history.snapshot().await;

        let record = self.provider.generate_word(&history).await;
        if record.is_none() {
            error!("{} failed to generate a word.", self.provider.provider_name());
        }
        record
    }

    /// Render `record` as post text, see [`format_post`]
    pub fn generate_post_text(&self, record: &WordRecord) -> String {
        format_post(record)
    }

    /// Record `word` as used (idempotent, persisted immediately)
    pub async fn mark_as_used(&self, word: &str) -> MarkOutcome {
        let outcome = self.history.mark_used(word).await;
        if let MarkOutcome::Appended { persisted: true } = outcome {
            info!("Marked '{}' as used ({} store)", word, self.history.store_name());
        }
        outcome
    }

    /// The current history snapshot
    pub async fn history(&self) -> History {
        self.history.snapshot().await
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }
}

/// Render the fixed four-part post layout
///
/// ```text
/// WORD
///
/// ℹ️ meaning
///
/// 🗣️ “sentence”
///
/// 🏷️ domain
/// ```
///
/// Pure: the same record always yields byte-identical text.
pub fn format_post(record: &WordRecord) -> String {
    format!(
        "{}\n\nℹ️ {}\n\n🗣️ “{}”\n\n🏷️ {}",
        record.word.to_uppercase(),
        record.meaning,
        record.sentence,
        record.domain
    )
}
