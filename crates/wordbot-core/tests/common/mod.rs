//! Test doubles and common utilities for the bot contract tests
//!
//! The doubles record every call so tests can assert on what the engine
//! did without any network access.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use wordbot_core::error::{Error, Result};
use wordbot_core::traits::{Poster, WordProvider};
use wordbot_core::types::PostReceipt;

/// A valid word record response as a model would return it
pub const LACONIC_JSON: &str = r#"{"word":"Laconic","meaning":"Using very few words.","sentence":"His laconic reply ended the debate.","domain":"Communication"}"#;

/// A word provider that answers from a script of canned responses
///
/// Once the script is exhausted every further call fails.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    /// Provider answering each call with the next entry of `responses`
    pub fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Provider answering once with `text`
    pub fn answering(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// Provider whose only call fails with an authentication error
    pub fn failing() -> Self {
        Self::new(vec![Err(Error::auth("invalid api key"))])
    }

    /// Shared handle to the call counter
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }

    /// Shared handle to the prompts received so far
    pub fn prompt_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait::async_trait]
impl WordProvider for ScriptedProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::provider("scripted", "script exhausted")))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// A single post request seen by [`RecordingPoster`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPost {
    pub text: String,
    pub reply_to_id: Option<String>,
}

/// A poster that records requests and succeeds or fails on demand
pub struct RecordingPoster {
    succeed: bool,
    posts: Arc<Mutex<Vec<RecordedPost>>>,
}

impl RecordingPoster {
    /// Poster whose every request succeeds
    pub fn succeeding() -> Self {
        Self {
            succeed: true,
            posts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Poster whose every request is rejected
    pub fn rejecting() -> Self {
        Self {
            succeed: false,
            posts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the recorded requests
    pub fn post_log(&self) -> Arc<Mutex<Vec<RecordedPost>>> {
        Arc::clone(&self.posts)
    }
}

#[async_trait::async_trait]
impl Poster for RecordingPoster {
    async fn create_post(&self, text: &str, reply_to_id: Option<&str>) -> Result<PostReceipt> {
        let mut posts = self.posts.lock().unwrap();
        posts.push(RecordedPost {
            text: text.to_string(),
            reply_to_id: reply_to_id.map(str::to_string),
        });

        if self.succeed {
            Ok(PostReceipt {
                id: format!("{}", 1000 + posts.len()),
                url: None,
            })
        } else {
            Err(Error::from_status("x", 403, "read-only application"))
        }
    }

    fn poster_name(&self) -> &'static str {
        "recording"
    }
}

/// Log sink shared between a test and its subscriber
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Capture log output on the current thread until the guard is dropped
///
/// `#[tokio::test]` runs on a current-thread runtime, so everything the
/// test awaits logs into the returned buffer.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}
