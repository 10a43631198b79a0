//! Posting client
//!
//! Wraps an optional [`Poster`]. With no poster configured (no credentials)
//! every post degrades to a logged dry run that reports success without
//! touching the network.

use tracing::{error, info};

use crate::traits::Poster;

/// Social network posting client with built-in dry-run degradation
pub struct PostingClient {
    poster: Option<Box<dyn Poster>>,
}

impl PostingClient {
    /// Client that publishes through `poster`
    pub fn new(poster: Box<dyn Poster>) -> Self {
        Self {
            poster: Some(poster),
        }
    }

    /// Client with no credentials: every post is logged only
    pub fn dry_run() -> Self {
        Self { poster: None }
    }

    /// Whether posts actually reach the network
    pub fn is_live(&self) -> bool {
        self.poster.is_some()
    }

    /// Publish `text`, optionally as a reply to `reply_to_id`
    ///
    /// # Returns
    ///
    /// - `true`: Posted (or logged, when no poster is configured)
    /// - `false`: The poster reported a failure, which has been logged
    pub async fn post(&self, text: &str, reply_to_id: Option<&str>) -> bool {
        let Some(poster) = &self.poster else {
            match reply_to_id {
                Some(id) => info!("[DRY RUN] Would post reply to {}:\n{}", id, text),
                None => info!("[DRY RUN] Would post:\n{}", text),
            }
            return true;
        };

        match poster.create_post(text, reply_to_id).await {
            Ok(receipt) => {
                match &receipt.url {
                    Some(url) => info!(
                        "Posted successfully to {}. ID: {} URL: {}",
                        poster.poster_name(),
                        receipt.id,
                        url
                    ),
                    None => info!(
                        "Posted successfully to {}. ID: {}",
                        poster.poster_name(),
                        receipt.id
                    ),
                }
                true
            }
            Err(e) => {
                error!("Failed to post to {}: {}", poster.poster_name(), e);
                false
            }
        }
    }
}
