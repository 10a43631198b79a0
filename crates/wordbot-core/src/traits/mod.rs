//! Core traits for the vocabulary bot
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`WordProvider`]: Generate a vocabulary word via a remote model
//! - [`HistoryStore`]: Durable ledger of words already used
//! - [`Poster`]: Publish text to the social network

pub mod word_provider;
pub mod history_store;
pub mod poster;

pub use word_provider::{WordProvider, WordProviderFactory};
pub use history_store::{HistoryStore, MarkOutcome};
pub use poster::Poster;
