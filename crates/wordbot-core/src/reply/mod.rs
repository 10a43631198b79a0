//! Reply engine
//!
//! Scans text for overused jargon and proposes a plain-language swap.
//! Entirely static: no remote calls, no persisted state.

use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;

use crate::error::{Error, Result};

/// Jargon phrase → plain-language replacement, in match priority order
pub const REPLACEMENTS: [(&str, &str); 14] = [
    ("utilize", "use"),
    ("leverage", "use"),
    ("facilitate", "help"),
    ("exacerbate", "worsen"),
    ("ameliorate", "improve"),
    ("optimal", "best"),
    ("cognizant", "aware"),
    ("paradigm shift", "change"),
    ("synergy", "teamwork"),
    ("bandwidth", "time/energy"),
    ("bottom line", "result"),
    ("deep dive", "look closer"),
    ("circle back", "return"),
    ("loop in", "include"),
];

/// Reply phrasings; `{complex}` is the jargon, `{simple}` the replacement
pub const TEMPLATES: [&str; 4] = [
    "Why say '{complex}' when '{simple}' works just as well?",
    "'{simple}' is the word you're looking for. It's punchier than '{complex}'.",
    "Brevity is wit. Try '{simple}' instead of '{complex}'.",
    "Cut the fluff: '{complex}' -> '{simple}'.",
];

/// A jargon phrase found in the analysed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JargonMatch {
    /// The table key that matched
    pub jargon: &'static str,
    /// Its plain-language replacement
    pub replacement: &'static str,
}

/// Static jargon detector and reply writer
#[derive(Debug)]
pub struct ReplyEngine {
    rules: Vec<(Regex, JargonMatch)>,
}

impl ReplyEngine {
    /// Compile the whole-word matchers for [`REPLACEMENTS`]
    pub fn new() -> Result<Self> {
        let rules = REPLACEMENTS
            .iter()
            .map(|&(jargon, replacement)| {
                let pattern = format!(r"\b{}\b", regex::escape(jargon));
                Regex::new(&pattern)
                    .map(|regex| (regex, JargonMatch { jargon, replacement }))
                    .map_err(|e| Error::config(format!("Invalid jargon pattern '{}': {}", jargon, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Find the first table entry present in `text` as a whole word
    ///
    /// Matching is case-insensitive. Entries are tried in table order and
    /// only the first hit is returned, even if `text` holds several.
    pub fn analyze_text(&self, text: &str) -> Option<JargonMatch> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|(regex, _)| regex.is_match(&lower))
            .map(|(_, found)| *found)
    }

    /// Write a reply using a randomly chosen template
    pub fn generate_reply(&self, jargon: &str, replacement: &str) -> String {
        self.generate_reply_with(&mut rand::thread_rng(), jargon, replacement)
    }

    /// Write a reply using a template chosen by `rng`
    pub fn generate_reply_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        jargon: &str,
        replacement: &str,
    ) -> String {
        let template = TEMPLATES.choose(rng).copied().unwrap_or(TEMPLATES[0]);
        fill_template(template, jargon, replacement)
    }
}

/// Substitute both placeholders of a reply template
pub fn fill_template(template: &str, jargon: &str, replacement: &str) -> String {
    template
        .replace("{complex}", jargon)
        .replace("{simple}", replacement)
}
