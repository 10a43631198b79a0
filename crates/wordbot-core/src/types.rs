//! Data model shared by every crate in the workspace

use serde::{Deserialize, Serialize};

/// The four required keys of a generated word, in prompt order
pub const REQUIRED_KEYS: [&str; 4] = ["word", "meaning", "sentence", "domain"];

/// A vocabulary word produced by one provider call
///
/// All four fields are required. A record only exists once a provider
/// response has been validated, see [`WordRecord::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    /// The word itself (e.g. "Enshittification")
    pub word: String,
    /// Short, witty definition
    pub meaning: String,
    /// Example sentence using the word
    pub sentence: String,
    /// Theme or category the word belongs to
    pub domain: String,
}

impl WordRecord {
    /// Create a new record from its four parts
    pub fn new(
        word: impl Into<String>,
        meaning: impl Into<String>,
        sentence: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            sentence: sentence.into(),
            domain: domain.into(),
        }
    }

    /// Build a record from a decoded JSON value
    ///
    /// The value must be an object carrying every key in [`REQUIRED_KEYS`]
    /// as a string. Extra keys are ignored.
    ///
    /// # Returns
    ///
    /// - `Ok(WordRecord)`: All four fields present
    /// - `Err(Error::InvalidResponse)`: Not an object, or keys missing / not strings
    pub fn from_json(value: &serde_json::Value) -> crate::Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            crate::Error::invalid_response(format!(
                "expected a JSON object, got: {}",
                json_kind(value)
            ))
        })?;

        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !object.get(*key).is_some_and(serde_json::Value::is_string))
            .collect();

        if !missing.is_empty() {
            let present: Vec<&str> = object.keys().map(String::as_str).collect();
            return Err(crate::Error::invalid_response(format!(
                "missing or non-string keys {:?} (present: {:?})",
                missing, present
            )));
        }

        let field = |key: &str| {
            object
                .get(key)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Ok(Self {
            word: field("word"),
            meaning: field("meaning"),
            sentence: field("sentence"),
            domain: field("domain"),
        })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Ordered list of words already published
///
/// Uniqueness is kept by appending only words that are not yet present.
/// Nothing is ever removed. Serializes as a plain JSON array of strings.
///
/// Deserialization takes the array as-is: a hand-edited file with repeated
/// entries keeps them, and later appends still skip those words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<String>);

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `word` has already been used (exact match)
    pub fn contains(&self, word: &str) -> bool {
        self.0.iter().any(|used| used == word)
    }

    /// Append `word` unless it is already present
    ///
    /// Returns `true` if the word was appended.
    pub fn push_unique(&mut self, word: impl Into<String>) -> bool {
        let word = word.into();
        if self.contains(&word) {
            return false;
        }
        self.0.push(word);
        true
    }

    /// The last `n` entries, oldest first
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.0.len().saturating_sub(n);
        &self.0[start..]
    }

    /// Number of used words
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no word has been used yet
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All entries, oldest first
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate over the entries, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for History {
    /// Build a history from raw entries, dropping later duplicates
    fn from(words: Vec<String>) -> Self {
        let mut history = History::new();
        for word in words {
            history.push_unique(word);
        }
        history
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Identifier of a published post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReceipt {
    /// Platform-specific post ID
    pub id: String,
    /// Public URL of the post, when the platform has one
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_loads_repeated_entries_as_is() {
        let mut history: History = serde_json::from_str(r#"["a","a"]"#).unwrap();
        assert_eq!(history.len(), 2);

        assert!(!history.push_unique("a"));
        assert!(history.push_unique("b"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_record_from_complete_object() {
        let value = json!({
            "word": "Enshittification",
            "meaning": "The slow rot of a platform.",
            "sentence": "The app's enshittification was swift.",
            "domain": "Tech",
        });

        let record = WordRecord::from_json(&value).unwrap();
        assert_eq!(record.word, "Enshittification");
        assert_eq!(record.domain, "Tech");
    }

    #[test]
    fn test_record_ignores_extra_keys() {
        let value = json!({
            "word": "Ennui",
            "meaning": "Fancy boredom.",
            "sentence": "Sunday ennui hit hard.",
            "domain": "Philosophy",
            "confidence": 0.9,
        });

        assert!(WordRecord::from_json(&value).is_ok());
    }

    #[test]
    fn test_record_missing_key_is_named() {
        let value = json!({"word": "Ennui", "meaning": "Fancy boredom.", "domain": "Philosophy"});

        let err = WordRecord::from_json(&value).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidResponse(_)));
        assert!(err.to_string().contains("sentence"));
    }

    #[test]
    fn test_record_rejects_non_string_field() {
        let value = json!({"word": 42, "meaning": "m", "sentence": "s", "domain": "d"});
        assert!(WordRecord::from_json(&value).is_err());
    }

    #[test]
    fn test_record_rejects_non_object() {
        let err = WordRecord::from_json(&json!(["word"])).unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_history_push_unique() {
        let mut history = History::new();
        assert!(history.push_unique("bandwidth"));
        assert!(!history.push_unique("bandwidth"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_history_recent_window() {
        let history = History::from((0..150).map(|i| format!("w{}", i)).collect::<Vec<_>>());

        let recent = history.recent(100);
        assert_eq!(recent.len(), 100);
        assert_eq!(recent.first().map(String::as_str), Some("w50"));
        assert_eq!(recent.last().map(String::as_str), Some("w149"));

        assert_eq!(History::new().recent(100).len(), 0);
    }

    #[test]
    fn test_history_serializes_as_array() {
        let history = History::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(serde_json::to_string(&history).unwrap(), r#"["a","b"]"#);

        let parsed: History = serde_json::from_str(r#"["x","y"]"#).unwrap();
        assert_eq!(parsed.as_slice(), ["x", "y"]);

        assert!(serde_json::from_str::<History>(r#"["x", 1]"#).is_err());
    }
}
