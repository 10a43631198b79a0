//! Configuration types for the vocabulary bot
//!
//! This module defines all configuration structures used throughout the crate.
//! Values are supplied by the binary (from environment variables); nothing
//! here reads the environment itself.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Groq model
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Default Gemini model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

/// Default history file location
pub const DEFAULT_HISTORY_PATH: &str = "data/history.json";

/// Substrings that mark a credential as an unfilled placeholder
const PLACEHOLDERS: [&str; 4] = ["your_key", "your_token", "replace_me", "changeme"];

/// Reject empty and obviously placeholder secrets
fn validate_secret(name: &str, value: &str) -> Result<(), crate::Error> {
    if value.is_empty() {
        return Err(crate::Error::config(format!("{} cannot be empty", name)));
    }

    let lower = value.to_lowercase();
    if PLACEHOLDERS.iter().any(|p| lower.contains(p)) {
        return Err(crate::Error::config(format!(
            "{} appears to be a placeholder. Use an actual credential.",
            name
        )));
    }

    Ok(())
}

/// Word provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Groq (OpenAI-compatible chat completions)
    Groq {
        /// Groq API key
        api_key: String,
        /// Model name
        model: String,
        /// API base URL override (tests, proxies)
        base_url: Option<String>,
    },

    /// Google Gemini (Generative Language API)
    Gemini {
        /// Gemini API key
        api_key: String,
        /// Model name
        model: String,
        /// API base URL override (tests, proxies)
        base_url: Option<String>,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Groq configuration with the default model
    pub fn groq(api_key: impl Into<String>) -> Self {
        ProviderConfig::Groq {
            api_key: api_key.into(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            base_url: None,
        }
    }

    /// Gemini configuration with the default model
    pub fn gemini(api_key: impl Into<String>) -> Self {
        ProviderConfig::Gemini {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: None,
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Groq { api_key, model, .. } => {
                validate_secret("Groq API key", api_key)?;
                if model.is_empty() {
                    return Err(crate::Error::config("Groq model cannot be empty"));
                }
                Ok(())
            }
            ProviderConfig::Gemini { api_key, model, .. } => {
                validate_secret("Gemini API key", api_key)?;
                if model.is_empty() {
                    return Err(crate::Error::config("Gemini model cannot be empty"));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Groq { .. } => "groq",
            ProviderConfig::Gemini { .. } => "gemini",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Groq { model, base_url, .. } => f
                .debug_struct("Groq")
                .field("api_key", &"<REDACTED>")
                .field("model", model)
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::Gemini { model, base_url, .. } => f
                .debug_struct("Gemini")
                .field("api_key", &"<REDACTED>")
                .field("model", model)
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::Custom { factory, .. } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", &"<REDACTED>")
                .finish(),
        }
    }
}

/// Posting client configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PosterConfig {
    /// X (Twitter) API v2 with OAuth 1.0a user context
    X {
        /// OAuth consumer key (API key)
        consumer_key: String,
        /// OAuth consumer secret (API secret)
        consumer_secret: String,
        /// OAuth access token
        access_token: String,
        /// OAuth access token secret
        access_token_secret: String,
        /// API base URL override (tests)
        base_url: Option<String>,
    },
}

impl PosterConfig {
    /// Validate the poster configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            PosterConfig::X {
                consumer_key,
                consumer_secret,
                access_token,
                access_token_secret,
                ..
            } => {
                validate_secret("CONSUMER_KEY", consumer_key)?;
                validate_secret("CONSUMER_SECRET", consumer_secret)?;
                validate_secret("ACCESS_TOKEN", access_token)?;
                validate_secret("ACCESS_TOKEN_SECRET", access_token_secret)?;
                Ok(())
            }
        }
    }

    /// Get the poster type name
    pub fn type_name(&self) -> &str {
        match self {
            PosterConfig::X { .. } => "x",
        }
    }
}

// Custom Debug implementation that hides every OAuth secret
impl std::fmt::Debug for PosterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PosterConfig::X { base_url, .. } => f
                .debug_struct("X")
                .field("consumer_key", &"<REDACTED>")
                .field("consumer_secret", &"<REDACTED>")
                .field("access_token", &"<REDACTED>")
                .field("access_token_secret", &"<REDACTED>")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

/// History store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryConfig {
    /// JSON file on disk
    File {
        /// Path to the history file
        path: PathBuf,
    },

    /// In-memory only (lost on exit)
    Memory,
}

impl HistoryConfig {
    /// Validate the history configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            HistoryConfig::File { path } if path.as_os_str().is_empty() => {
                Err(crate::Error::config("History file path cannot be empty"))
            }
            _ => Ok(()),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig::File {
            path: PathBuf::from(DEFAULT_HISTORY_PATH),
        }
    }
}
