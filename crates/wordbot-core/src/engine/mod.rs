//! Bot engine
//!
//! The BotEngine sequences a single run of the bot:
//! - **Post**: generate a word → render → publish → mark as used
//! - **Reply**: detect jargon → write a reply → publish (optional)
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────┐
//!                    │  BotEngine   │
//!                    └──────────────┘
//!                            │
//!         ┌──────────────────┼──────────────────┐
//!         │                  │                  │
//!         ▼                  ▼                  ▼
//! ┌────────────────┐ ┌──────────────┐ ┌────────────────┐
//! │ ContentManager │ │ ReplyEngine  │ │ PostingClient  │
//! │ (word+history) │ │ (jargon)     │ │ (publish)      │
//! └────────────────┘ └──────────────┘ └────────────────┘
//! ```
//!
//! ## Post Flow
//!
//! 1. Ask the ContentManager for the next word (history passed along)
//! 2. Render the post text
//! 3. In dry-run mode, log the text and stop (history untouched)
//! 4. Publish through the PostingClient
//! 5. Only after a successful publish, mark the word as used
//!
//! A word that is published but whose history write then fails stays
//! unrecorded; there is no compensating action.

use tracing::{error, info, warn};

use crate::content::ContentManager;
use crate::posting::PostingClient;
use crate::reply::{JargonMatch, ReplyEngine};
use crate::traits::MarkOutcome;
use crate::types::WordRecord;

/// Result of [`BotEngine::run_post`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// No word could be generated (no provider, remote failure, bad response)
    GenerationFailed,

    /// Dry run: text rendered and logged, nothing posted or recorded
    DryRun {
        record: WordRecord,
        text: String,
    },

    /// Posted and handed to the history store
    Posted {
        word: String,
        text: String,
        marked: MarkOutcome,
    },

    /// The post was rejected; history untouched
    PostFailed {
        word: String,
        text: String,
    },
}

impl PostOutcome {
    /// Whether the run must end with a non-zero exit code
    pub fn is_fatal(&self) -> bool {
        matches!(self, PostOutcome::GenerationFailed)
    }
}

/// Result of [`BotEngine::run_reply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// No text to analyse was supplied
    MissingText,

    /// The text holds none of the jargon phrases
    NoJargon,

    /// Dry run: reply written and logged only
    DryRun { found: JargonMatch, reply: String },

    /// No post to reply to: reply written and logged only
    Drafted { found: JargonMatch, reply: String },

    /// Reply published
    Posted { found: JargonMatch, reply: String },

    /// Reply rejected by the poster
    PostFailed { found: JargonMatch, reply: String },
}

impl ReplyOutcome {
    /// Whether the run must end with a non-zero exit code
    pub fn is_fatal(&self) -> bool {
        matches!(self, ReplyOutcome::MissingText)
    }
}

/// Core bot engine
///
/// ## Lifecycle
///
/// 1. Create with [`BotEngine::new()`], attach a [`ContentManager`] for post mode
/// 2. Call [`BotEngine::run_post()`] or [`BotEngine::run_reply()`] once
/// 3. Drop
///
/// Every step is awaited in sequence; there is no concurrency inside a run.
pub struct BotEngine {
    /// Word generation + history (absent when no provider is configured)
    content: Option<ContentManager>,

    /// Jargon detection
    replies: ReplyEngine,

    /// Publishing
    posting: PostingClient,
}

impl BotEngine {
    /// Create an engine without word generation
    ///
    /// Post runs fail with [`PostOutcome::GenerationFailed`] until a
    /// content manager is attached with [`BotEngine::with_content`].
    pub fn new(replies: ReplyEngine, posting: PostingClient) -> Self {
        Self {
            content: None,
            replies,
            posting,
        }
    }

    /// Attach the content manager used by post runs
    pub fn with_content(mut self, content: ContentManager) -> Self {
        self.content = Some(content);
        self
    }

    /// The attached content manager, if any
    pub fn content(&self) -> Option<&ContentManager> {
        self.content.as_ref()
    }

    /// Run the scheduled word post
    pub async fn run_post(&self, dry_run: bool) -> PostOutcome {
        info!("Starting curated word post job...");

        let Some(content) = &self.content else {
            error!("Failed to generate word data: no word provider is configured. Check the API key.");
            return PostOutcome::GenerationFailed;
        };

        let Some(record) = content.get_next_word().await else {
            error!("Failed to generate word data. Check the API key and logs.");
            return PostOutcome::GenerationFailed;
        };

        let text = content.generate_post_text(&record);

        if dry_run {
            // History is left alone so the word stays available for a real run
            info!("[DRY RUN] Content to post:\n{}", text);
            return PostOutcome::DryRun { record, text };
        }

        if !self.posting.post(&text, None).await {
            error!("Failed to post word '{}'.", record.word);
            return PostOutcome::PostFailed {
                word: record.word,
                text,
            };
        }

        let marked = content.mark_as_used(&record.word).await;
        match marked {
            MarkOutcome::Appended { persisted: true } => {
                info!("Posted and marked '{}' as used.", record.word)
            }
            MarkOutcome::Appended { persisted: false } => warn!(
                "Posted '{}', but the history update was not persisted.",
                record.word
            ),
            MarkOutcome::AlreadyPresent => {
                info!("Posted '{}', which was already in history.", record.word)
            }
        }

        PostOutcome::Posted {
            word: record.word,
            text,
            marked,
        }
    }

    /// Run the contextual reply job over `text`
    ///
    /// With `reply_to` set (and not a dry run) the reply is published as a
    /// reply to that post; otherwise it is only logged.
    pub async fn run_reply(
        &self,
        text: Option<&str>,
        reply_to: Option<&str>,
        dry_run: bool,
    ) -> ReplyOutcome {
        info!("Starting contextual reply job...");

        let Some(text) = text.filter(|t| !t.is_empty()) else {
            error!("Reply mode requires --text argument to analyze.");
            return ReplyOutcome::MissingText;
        };

        let Some(found) = self.replies.analyze_text(text) else {
            info!("No trigger words found in the text.");
            return ReplyOutcome::NoJargon;
        };

        let reply = self.replies.generate_reply(found.jargon, found.replacement);

        if dry_run {
            info!("[DRY RUN] Would reply: '{}'", reply);
            return ReplyOutcome::DryRun { found, reply };
        }

        let Some(target) = reply_to else {
            info!("Generated reply: {}", reply);
            return ReplyOutcome::Drafted { found, reply };
        };

        if self.posting.post(&reply, Some(target)).await {
            ReplyOutcome::Posted { found, reply }
        } else {
            error!("Failed to post reply to {}.", target);
            ReplyOutcome::PostFailed { found, reply }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> BotEngine {
        BotEngine::new(ReplyEngine::new().unwrap(), PostingClient::dry_run())
    }

    #[tokio::test]
    async fn test_post_without_provider_fails() {
        let outcome = engine().run_post(false).await;
        assert_eq!(outcome, PostOutcome::GenerationFailed);
        assert!(outcome.is_fatal());
    }

    #[tokio::test]
    async fn test_reply_missing_text_is_fatal() {
        let engine = engine();
        assert!(engine.run_reply(None, None, false).await.is_fatal());
        assert!(engine.run_reply(Some(""), None, true).await.is_fatal());
    }

    #[tokio::test]
    async fn test_reply_without_jargon_is_not_fatal() {
        let outcome = engine().run_reply(Some("hello there"), None, false).await;
        assert_eq!(outcome, ReplyOutcome::NoJargon);
        assert!(!outcome.is_fatal());
    }

    #[tokio::test]
    async fn test_reply_without_target_is_drafted() {
        let outcome = engine()
            .run_reply(Some("Let's circle back"), None, false)
            .await;

        match outcome {
            ReplyOutcome::Drafted { found, reply } => {
                assert_eq!(found.jargon, "circle back");
                assert!(reply.contains("return"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
