// # Poster Trait
//
// Defines the interface for the social network's create-post call.
//
// ## Implementations
//
// - X (Twitter) API v2: `wordbot-poster-x` crate
//
// Posters are single-shot: one request per call, no retries, no rate-limit
// handling. Dry-run degradation lives in `PostingClient`, not here.

use async_trait::async_trait;

use crate::types::PostReceipt;

/// Trait for social network posting implementations
#[async_trait]
pub trait Poster: Send + Sync {
    /// Publish `text`, optionally as a reply to the post `reply_to_id`
    ///
    /// # Returns
    ///
    /// - `Ok(PostReceipt)`: The post was created
    /// - `Err(Error)`: The post was not created
    async fn create_post(
        &self,
        text: &str,
        reply_to_id: Option<&str>,
    ) -> Result<PostReceipt, crate::Error>;

    /// Get the platform name (for logging/debugging)
    fn poster_name(&self) -> &'static str;
}
