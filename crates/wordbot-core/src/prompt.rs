//! Prompt construction and response normalisation
//!
//! Shared by every [`WordProvider`](crate::WordProvider) so that remote
//! variants differ only in transport.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{Error, Result};
use crate::types::{History, WordRecord};

/// How many of the most recent history entries the prompt excludes
pub const HISTORY_WINDOW: usize = 100;

/// Themes rotated across runs to bias the model toward variety
pub const THEMES: [&str; 6] = [
    "Current Tech News & AI (e.g. Hallucination, Alignment)",
    "Modern Corporate Work Life (e.g. Boilerplate, Bandwidth)",
    "Internet Culture & Memes (e.g. Cringe, Based, ratio)",
    "Psychology & Emotions (e.g. Imposter Syndrome, Burnout)",
    "Global Affairs & Politics (e.g. Brinkmanship, Sanctions)",
    "Philosophy of Modern Life (e.g. Ennui, Angst)",
];

/// Pick one theme uniformly at random using the thread-local RNG
pub fn random_theme() -> &'static str {
    choose_theme(&mut rand::thread_rng())
}

/// Pick one theme uniformly at random
pub fn choose_theme<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    THEMES.choose(rng).copied().unwrap_or(THEMES[0])
}

/// The instruction sent to the remote model for one word
#[derive(Debug, Clone)]
pub struct WordPrompt<'a> {
    theme: &'a str,
    excluded: &'a [String],
}

impl<'a> WordPrompt<'a> {
    /// Build a prompt for `theme` that excludes the recent part of `history`
    pub fn new(theme: &'a str, history: &'a History) -> Self {
        Self {
            theme,
            excluded: history.recent(HISTORY_WINDOW),
        }
    }

    /// The theme this prompt steers toward
    pub fn theme(&self) -> &str {
        self.theme
    }

    /// Words the prompt tells the model to avoid
    pub fn excluded(&self) -> &[String] {
        self.excluded
    }

    /// Render the full prompt text
    pub fn render(&self) -> String {
        let excluded = serde_json::to_string(self.excluded).unwrap_or_else(|_| "[]".to_string());

        format!(
            r#"You are a witty, sophisticated vocabulary assistant.
Target Audience: Smart professionals and internet-native users.

Task: Pick a "trendy, rare, or contextually specific" word that fits the theme: **{theme}**.

Constraints:
1. The word must NOT be in this list: {excluded} (the last {window} words used).
2. The word should be sophisticated yet useful. It can be a neologism if it is widely accepted (e.g. 'Enshittification').
3. Do NOT use extremely common words.

Output format (JSON only, no markdown):
{{
    "word": "TheWord",
    "meaning": "A short, sharp, witty definition (max 15 words). Avoid dictionary speak.",
    "sentence": "A natural sentence showing how to use it in a post or casual conversation.",
    "domain": "The theme/category (e.g. Tech, Meme Theory, Work)."
}}"#,
            theme = self.theme,
            excluded = excluded,
            window = HISTORY_WINDOW,
        )
    }
}

/// Remove a surrounding markdown code fence, if any
///
/// Handles both bare fences and fences with a language tag (```` ```json ````).
/// Text without a leading fence is only trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the rest of the opening fence line (the language tag)
    let body = match after_open.find('\n') {
        Some(newline) => &after_open[newline + 1..],
        None => after_open.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };

    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a raw completion into a validated [`WordRecord`]
///
/// # Returns
///
/// - `Ok(WordRecord)`: Valid JSON object with all four keys
/// - `Err(Error::InvalidResponse)`: Not JSON, not an object, or keys missing
pub fn parse_word_record(raw: &str) -> Result<WordRecord> {
    let cleaned = strip_code_fences(raw);
    let value: serde_json::Value = serde_json::from_str(cleaned)
        .map_err(|e| Error::invalid_response(format!("not valid JSON ({}): {}", e, preview(cleaned))))?;

    WordRecord::from_json(&value)
}

/// First few characters of a response, for error messages
fn preview(text: &str) -> String {
    const MAX: usize = 80;
    match text.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
