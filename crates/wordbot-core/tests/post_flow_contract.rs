//! Contract tests for the scheduled word post
//!
//! A word enters the history only after it has been published. Dry runs
//! and failed posts never touch the ledger.

mod common;

use std::sync::atomic::Ordering;

use common::{LACONIC_JSON, RecordingPoster, ScriptedProvider, capture_logs};
use wordbot_core::history::MemoryHistoryStore;
use wordbot_core::traits::{HistoryStore, MarkOutcome};
use wordbot_core::types::History;
use wordbot_core::{BotEngine, ContentManager, PostOutcome, PostingClient, ReplyEngine};

const ENSHITTIFICATION_JSON: &str = r#"{"word":"Enshittification","meaning":"The gradual decay of a platform's quality.","sentence":"Users blamed enshittification for the new fees.","domain":"Tech"}"#;

fn engine(
    provider: ScriptedProvider,
    history: MemoryHistoryStore,
    posting: PostingClient,
) -> BotEngine {
    let content = ContentManager::new(Box::new(provider), Box::new(history));
    BotEngine::new(ReplyEngine::new().unwrap(), posting).with_content(content)
}

#[tokio::test]
async fn test_dry_run_formats_post_and_leaves_history_unchanged() {
    let history = MemoryHistoryStore::new();
    let poster = RecordingPoster::succeeding();
    let posts = poster.post_log();

    let engine = engine(
        ScriptedProvider::answering(ENSHITTIFICATION_JSON),
        history.clone(),
        PostingClient::new(Box::new(poster)),
    );

    let outcome = engine.run_post(true).await;
    let PostOutcome::DryRun { record, text } = outcome else {
        panic!("expected a dry run");
    };

    assert_eq!(record.word, "Enshittification");
    assert!(text.starts_with("ENSHITTIFICATION\n\n"));
    assert!(text.ends_with("🏷️ Tech"));

    assert!(history.is_empty().await);
    assert!(posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_repeat_word_is_logged_as_already_in_history() {
    let history = MemoryHistoryStore::with_history(History::from(vec!["Laconic".to_string()]));
    let (logs, _guard) = capture_logs();

    let engine = engine(
        ScriptedProvider::answering(LACONIC_JSON),
        history.clone(),
        PostingClient::new(Box::new(RecordingPoster::succeeding())),
    );

    let outcome = engine.run_post(false).await;
    assert!(matches!(
        outcome,
        PostOutcome::Posted {
            marked: MarkOutcome::AlreadyPresent,
            ..
        }
    ));
    assert_eq!(history.snapshot().await.as_slice(), ["Laconic"]);

    let output = logs.contents();
    assert!(output.contains("already in history"), "logs: {}", output);
    assert!(!output.contains("Posted and marked"), "logs: {}", output);
}

#[tokio::test]
async fn test_live_post_marks_word_as_used() {
    let history = MemoryHistoryStore::new();
    let poster = RecordingPoster::succeeding();
    let posts = poster.post_log();

    let engine = engine(
        ScriptedProvider::answering(LACONIC_JSON),
        history.clone(),
        PostingClient::new(Box::new(poster)),
    );

    let outcome = engine.run_post(false).await;
    assert!(matches!(
        outcome,
        PostOutcome::Posted {
            ref word,
            marked: MarkOutcome::Appended { persisted: true },
            ..
        } if word == "Laconic"
    ));

    assert_eq!(history.snapshot().await.as_slice(), ["Laconic"]);

    let posts = posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    assert!(posts[0].text.starts_with("LACONIC"));
    assert_eq!(posts[0].reply_to_id, None);
}

#[tokio::test]
async fn test_rejected_post_does_not_mark_word() {
    let history = MemoryHistoryStore::new();
    let engine = engine(
        ScriptedProvider::answering(LACONIC_JSON),
        history.clone(),
        PostingClient::new(Box::new(RecordingPoster::rejecting())),
    );

    let outcome = engine.run_post(false).await;
    assert!(matches!(outcome, PostOutcome::PostFailed { ref word, .. } if word == "Laconic"));
    assert!(!outcome.is_fatal());
    assert!(history.is_empty().await);
}

#[tokio::test]
async fn test_unconfigured_poster_still_marks_word() {
    // Missing credentials degrade to a logged post that counts as success
    let history = MemoryHistoryStore::new();
    let engine = engine(
        ScriptedProvider::answering(LACONIC_JSON),
        history.clone(),
        PostingClient::dry_run(),
    );

    let outcome = engine.run_post(false).await;
    assert!(matches!(outcome, PostOutcome::Posted { .. }));
    assert_eq!(history.len().await, 1);
}

#[tokio::test]
async fn test_incomplete_record_is_generation_failure() {
    let history = MemoryHistoryStore::new();
    let engine = engine(
        ScriptedProvider::answering(r#"{"word":"Laconic","meaning":"Brief."}"#),
        history.clone(),
        PostingClient::new(Box::new(RecordingPoster::succeeding())),
    );

    let outcome = engine.run_post(false).await;
    assert_eq!(outcome, PostOutcome::GenerationFailed);
    assert!(outcome.is_fatal());
    assert!(history.is_empty().await);
}

#[tokio::test]
async fn test_provider_error_is_not_retried() {
    let provider = ScriptedProvider::failing();
    let calls = provider.call_counter();

    let engine = engine(provider, MemoryHistoryStore::new(), PostingClient::dry_run());

    assert_eq!(engine.run_post(false).await, PostOutcome::GenerationFailed);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_prompt_lists_existing_history() {
    let provider = ScriptedProvider::answering(LACONIC_JSON);
    let prompts = provider.prompt_log();

    let history = MemoryHistoryStore::with_history(History::from(vec![
        "Ennui".to_string(),
        "Angst".to_string(),
    ]));
    let engine = engine(provider, history, PostingClient::dry_run());
    engine.run_post(true).await;

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(r#"["Ennui","Angst"]"#));
}
