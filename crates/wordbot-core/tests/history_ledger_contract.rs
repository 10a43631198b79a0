//! Contract tests for the history ledger
//!
//! The ledger is append-only, duplicate-free and ordered by insertion.
//! These tests hold both store implementations to that contract.

mod common;

use common::ScriptedProvider;
use wordbot_core::ContentManager;
use wordbot_core::history::{FileHistoryStore, MemoryHistoryStore};
use wordbot_core::traits::{HistoryStore, MarkOutcome};
use wordbot_core::types::History;

async fn assert_ledger_contract(store: &dyn HistoryStore) {
    assert_eq!(
        store.mark_used("Ennui").await,
        MarkOutcome::Appended { persisted: true }
    );
    assert_eq!(
        store.mark_used("Angst").await,
        MarkOutcome::Appended { persisted: true }
    );

    // Second insert of the same word is a no-op
    assert_eq!(store.mark_used("Ennui").await, MarkOutcome::AlreadyPresent);

    let history = store.snapshot().await;
    assert_eq!(history.as_slice(), ["Ennui", "Angst"]);
}

#[tokio::test]
async fn test_memory_store_honours_ledger_contract() {
    let store = MemoryHistoryStore::new();
    assert_ledger_contract(&store).await;
}

#[tokio::test]
async fn test_file_store_honours_ledger_contract() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHistoryStore::open(dir.path().join("history.json")).await;
    assert_ledger_contract(&store).await;
}

#[tokio::test]
async fn test_existing_word_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    tokio::fs::write(&path, "[\"Ennui\"]").await.unwrap();

    let store = FileHistoryStore::open(&path).await;
    assert_eq!(store.mark_used("Ennui").await, MarkOutcome::AlreadyPresent);

    // Compact on-disk form shows nothing was rewritten
    let content = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(content, "[\"Ennui\"]");
}

#[tokio::test]
async fn test_history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("history.json");

    {
        let store = FileHistoryStore::open(&path).await;
        store.mark_used("Ennui").await;
        store.mark_used("Angst").await;
    }

    let reopened = FileHistoryStore::open(&path).await;
    assert_eq!(reopened.load().await.as_slice(), ["Ennui", "Angst"]);
}

#[tokio::test]
async fn test_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHistoryStore::open(dir.path().join("absent.json")).await;

    assert!(store.load().await.is_empty());
    assert!(!dir.path().join("absent.json").exists());
}

#[tokio::test]
async fn test_saved_history_is_loaded_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = FileHistoryStore::open(&path).await;

    let history = History::from(vec!["Sonder".to_string(), "Hygge".to_string()]);
    store.save(&history).await.unwrap();

    let other = FileHistoryStore::open(&path).await;
    assert_eq!(other.load().await, history);
}

#[tokio::test]
async fn test_marking_known_word_keeps_history_length() {
    let history = MemoryHistoryStore::with_history(History::from(vec!["bandwidth".to_string()]));
    let content = ContentManager::new(
        Box::new(ScriptedProvider::new(Vec::new())),
        Box::new(history.clone()),
    );

    assert_eq!(content.mark_as_used("bandwidth").await, MarkOutcome::AlreadyPresent);
    assert_eq!(history.len().await, 1);
}
