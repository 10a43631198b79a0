// # Gemini Word Provider
//
// Word provider backed by Google's Generative Language API
// (`generateContent`).
//
// Like every provider this crate only performs the raw completion call;
// the prompt and the record parsing come from `wordbot-core`.
//
// ## API Reference
//
// - Generate content: POST `/v1beta/models/{model}:generateContent`
// - Authorization: `x-goog-api-key: <api key>`
// - JSON mode: `generationConfig.responseMimeType = "application/json"`

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use wordbot_core::config::ProviderConfig;
use wordbot_core::registry::ProviderRegistry;
use wordbot_core::traits::{WordProvider, WordProviderFactory};
use wordbot_core::{Error, Result};

/// Generative Language API base URL
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER_NAME: &str = "gemini";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

/// Gemini word provider
pub struct GeminiProvider {
    /// Gemini API key
    /// ⚠️ NEVER log this value
    api_key: String,

    /// Model name (e.g. `gemini-2.0-flash-exp`)
    model: String,

    /// API base URL without trailing slash
    base_url: String,

    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_key", &"<REDACTED>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: Gemini API key
    /// - `model`: Model name
    /// - `base_url`: Optional API base URL (defaults to [`GEMINI_API_BASE`])
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: Option<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::config("Gemini API key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url
            .unwrap_or_else(|| GEMINI_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key,
            model: model.into(),
            base_url,
            client,
        })
    }

    /// Model this provider asks for
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Concatenate the text parts of the first candidate
fn candidate_text(json: &Value) -> Option<String> {
    let parts = json["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl WordProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        tracing::debug!("Requesting content from Gemini model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::provider(PROVIDER_NAME, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(Error::from_status(PROVIDER_NAME, status.as_u16(), &error_text));
        }

        let json: Value = response.json().await.map_err(|e| {
            Error::provider(PROVIDER_NAME, format!("Failed to parse response: {}", e))
        })?;

        // A blocked prompt comes back as 200 with no candidates
        if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
            return Err(Error::invalid_response(format!(
                "Gemini blocked the prompt: {}",
                reason
            )));
        }

        candidate_text(&json).ok_or_else(|| {
            Error::invalid_response("Gemini response has no candidates[0].content.parts text")
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating Gemini providers
pub struct GeminiFactory;

impl WordProviderFactory for GeminiFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn WordProvider>> {
        match config {
            ProviderConfig::Gemini {
                api_key,
                model,
                base_url,
            } => {
                config.validate()?;
                Ok(Box::new(GeminiProvider::new(
                    api_key,
                    model,
                    base_url.clone(),
                )?))
            }
            _ => Err(Error::config("Invalid config for Gemini provider")),
        }
    }
}

/// Register the Gemini provider with a registry
pub fn register(registry: &mut ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(GeminiFactory));
}
