// # wordbot-core
//
// Core library for the vocabulary posting bot.
//
// ## Architecture Overview
//
// - **WordProvider**: Trait over a remote text-generation call that yields a `WordRecord`
// - **HistoryStore**: Trait for the append-only ledger of words already published
// - **Poster**: Trait for the social network's create-post call
// - **ContentManager**: Generates the next word against history and renders the post text
// - **ReplyEngine**: Static jargon lookup and reply templating, no external calls
// - **PostingClient**: Wraps an optional `Poster`, degrading to a logged dry run
// - **BotEngine**: Sequences one post or reply run
// - **ProviderRegistry**: Plugin-based registry for word providers
//
// ## Sequencing
//
// Every run is strictly sequential: history is loaded once, the remote
// provider is called once, the post is made once, and only after the post
// succeeds is the word appended to history and flushed to disk.

pub mod traits;
pub mod types;
pub mod prompt;
pub mod history;
pub mod content;
pub mod reply;
pub mod posting;
pub mod engine;
pub mod registry;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{HistoryStore, Poster, WordProvider};
pub use types::{History, PostReceipt, WordRecord};
pub use content::ContentManager;
pub use reply::ReplyEngine;
pub use posting::PostingClient;
pub use engine::{BotEngine, PostOutcome, ReplyOutcome};
pub use registry::ProviderRegistry;
pub use config::{HistoryConfig, PosterConfig, ProviderConfig};
pub use error::{Error, Result};
pub use history::{FileHistoryStore, MemoryHistoryStore};
