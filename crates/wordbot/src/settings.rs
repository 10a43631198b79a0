//! Environment configuration for the `wordbot` binary
//!
//! Every variable is read once by [`Settings::from_env`]. Unset and empty
//! variables are treated the same way.

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use tracing::{Level, warn};
use wordbot_core::config::{
    DEFAULT_GEMINI_MODEL, DEFAULT_GROQ_MODEL, DEFAULT_HISTORY_PATH, HistoryConfig, PosterConfig,
    ProviderConfig,
};

/// Provider names in selection order
pub const PROVIDER_ORDER: [&str; 2] = ["groq", "gemini"];

/// The four X OAuth 1.0a credential variables
pub const X_CREDENTIAL_VARS: [&str; 4] = [
    "CONSUMER_KEY",
    "CONSUMER_SECRET",
    "ACCESS_TOKEN",
    "ACCESS_TOKEN_SECRET",
];

/// Application configuration
pub struct Settings {
    pub groq_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub forced_provider: Option<String>,
    pub groq_model: String,
    pub gemini_model: String,
    /// X credentials in [`X_CREDENTIAL_VARS`] order
    pub x_credentials: [Option<String>; 4],
    pub history_path: PathBuf,
    pub log_level: String,
}

// Custom Debug implementation that hides every secret
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<REDACTED>"))
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<REDACTED>"))
            .field("forced_provider", &self.forced_provider)
            .field("groq_model", &self.groq_model)
            .field("gemini_model", &self.gemini_model)
            .field("history_path", &self.history_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Settings {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(var)
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            groq_api_key: lookup("GROQ_API_KEY"),
            gemini_api_key: lookup("GEMINI_API_KEY"),
            forced_provider: lookup("WORDBOT_PROVIDER").map(|p| p.to_lowercase()),
            groq_model: lookup("WORDBOT_GROQ_MODEL")
                .unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            gemini_model: lookup("WORDBOT_GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            x_credentials: X_CREDENTIAL_VARS.map(&lookup),
            history_path: lookup("WORDBOT_HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH)),
            log_level: lookup("WORDBOT_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref provider) = self.forced_provider
            && !PROVIDER_ORDER.contains(&provider.as_str())
        {
            anyhow::bail!(
                "WORDBOT_PROVIDER '{}' is not supported. \
                Supported providers: {}",
                provider,
                PROVIDER_ORDER.join(", ")
            );
        }

        for name in PROVIDER_ORDER {
            if let Some(config) = self.provider_config_for(name) {
                config.validate()?;
            }
        }

        if let Some(config) = self.poster_config() {
            config.validate()?;
        }

        self.history_config().validate()?;

        if self.level().is_none() {
            anyhow::bail!(
                "WORDBOT_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            );
        }

        Ok(())
    }

    /// Tracing level for `WORDBOT_LOG_LEVEL`
    pub fn level(&self) -> Option<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }

    /// The provider to use: the forced one, otherwise the first with a key
    pub fn provider_config(&self) -> Option<ProviderConfig> {
        match self.forced_provider.as_deref() {
            Some(name) => self.provider_config_for(name),
            None => PROVIDER_ORDER
                .iter()
                .find_map(|name| self.provider_config_for(name)),
        }
    }

    /// Configuration for provider `name`, if its key is set
    pub fn provider_config_for(&self, name: &str) -> Option<ProviderConfig> {
        match name {
            "groq" => self.groq_api_key.as_ref().map(|key| ProviderConfig::Groq {
                api_key: key.clone(),
                model: self.groq_model.clone(),
                base_url: None,
            }),
            "gemini" => self.gemini_api_key.as_ref().map(|key| ProviderConfig::Gemini {
                api_key: key.clone(),
                model: self.gemini_model.clone(),
                base_url: None,
            }),
            _ => None,
        }
    }

    /// History file configuration
    pub fn history_config(&self) -> HistoryConfig {
        HistoryConfig::File {
            path: self.history_path.clone(),
        }
    }

    /// X configuration, only when all four credentials are set
    pub fn poster_config(&self) -> Option<PosterConfig> {
        let [Some(ck), Some(cs), Some(at), Some(ats)] = &self.x_credentials else {
            return None;
        };

        Some(PosterConfig::X {
            consumer_key: ck.clone(),
            consumer_secret: cs.clone(),
            access_token: at.clone(),
            access_token_secret: ats.clone(),
            base_url: None,
        })
    }

    /// Log why posting will only be simulated
    pub fn warn_about_poster(&self) {
        let missing: Vec<&str> = X_CREDENTIAL_VARS
            .iter()
            .zip(&self.x_credentials)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        if missing.len() == X_CREDENTIAL_VARS.len() {
            warn!("API keys missing. Client will operate in dry-run mode only.");
        } else if !missing.is_empty() {
            warn!(
                "Incomplete X credentials (missing {}). Client will operate in dry-run mode only.",
                missing.join(", ")
            );
        }
    }
}

/// Mask a secret as `abcd...wxyz`
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
