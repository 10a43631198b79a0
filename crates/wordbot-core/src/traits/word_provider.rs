// # Word Provider Trait
//
// Defines the interface for generating a vocabulary word via a remote
// text-generation API.
//
// ## Implementations
//
// - Groq: `wordbot-provider-groq` crate
// - Gemini: `wordbot-provider-gemini` crate
//
// ## Usage
//
// ```rust,ignore
// use wordbot_core::{History, WordProvider};
//
// let provider = /* WordProvider implementation */;
// match provider.generate_word(&History::new()).await {
//     Some(record) => println!("{}", record.word),
//     None => eprintln!("no word produced"),
// }
// ```

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::prompt::{self, WordPrompt};
use crate::types::{History, WordRecord};

/// Trait for remote word provider implementations
///
/// Implementations only perform the raw completion call. Theme selection,
/// prompt construction, fence stripping and validation are shared by the
/// default [`WordProvider::generate_word`], so every variant behaves the
/// same for the caller.
///
/// # Constraints
///
/// - One HTTP request per `complete()` call
/// - No retry logic or backoff
/// - No access to the history store
#[async_trait]
pub trait WordProvider: Send + Sync {
    /// Send `prompt` to the remote model, asking for strict JSON output
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The raw completion text
    /// - `Err(Error)`: Transport, status, or envelope failure
    async fn complete(&self, prompt: &str) -> Result<String, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;

    /// Generate a word that is, by instruction, absent from `history`
    ///
    /// Picks a random theme, asks the model to avoid the last 100 history
    /// entries, and validates the four required fields. The exclusion is
    /// advisory only: the result is not re-checked against `history`.
    ///
    /// Never fails loudly. Every failure is logged and reported as `None`.
    async fn generate_word(&self, history: &History) -> Option<WordRecord> {
        let theme = prompt::random_theme();
        let request = WordPrompt::new(theme, history).render();

        info!("Requesting word from {} (theme: {})", self.provider_name(), theme);
        debug!("Excluding {} recent history entries", history.recent(prompt::HISTORY_WINDOW).len());

        let raw = match self.complete(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error generating content with {}: {}", self.provider_name(), e);
                return None;
            }
        };

        match prompt::parse_word_record(&raw) {
            Ok(record) => {
                debug!("{} returned word: {}", self.provider_name(), record.word);
                Some(record)
            }
            Err(e) => {
                error!("{} returned an unusable response: {}", self.provider_name(), e);
                None
            }
        }
    }
}

/// Helper trait for constructing word providers from configuration
pub trait WordProviderFactory: Send + Sync {
    /// Create a WordProvider instance from configuration
    ///
    /// # Returns
    ///
    /// A boxed WordProvider trait object
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn WordProvider>, crate::Error>;
}
