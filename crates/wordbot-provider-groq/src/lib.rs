// # Groq Word Provider
//
// Word provider backed by Groq's OpenAI-compatible chat completions API.
//
// The provider only performs the raw completion call. Theme selection,
// prompt construction, fence stripping and record validation are shared by
// every provider through `WordProvider::generate_word`.
//
// - One HTTP request per call
// - No retries and no fallback provider
// - HTTP timeout of 30 seconds
// - The API key never appears in logs or `Debug` output
//
// ## API Reference
//
// - Chat completions: POST `/openai/v1/chat/completions`
// - Authorization: `Bearer <api key>`
// - JSON mode: `response_format: {"type": "json_object"}`

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use wordbot_core::config::ProviderConfig;
use wordbot_core::registry::ProviderRegistry;
use wordbot_core::traits::{WordProvider, WordProviderFactory};
use wordbot_core::{Error, Result};

/// Groq API base URL
pub const GROQ_API_BASE: &str = "https://api.groq.com";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER_NAME: &str = "groq";

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Groq word provider
///
/// Stateless and single-shot: every `complete` call is one request.
pub struct GroqProvider {
    /// Groq API key
    /// ⚠️ NEVER log this value
    api_key: String,

    /// Model name (e.g. `llama-3.3-70b-versatile`)
    model: String,

    /// API base URL without trailing slash
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for GroqProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqProvider")
            .field("api_key", &"<REDACTED>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GroqProvider {
    /// Create a new Groq provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: Groq API key
    /// - `model`: Chat model name
    /// - `base_url`: Optional API base URL (defaults to [`GROQ_API_BASE`])
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)`: If the key is empty
    /// - `Err(Error::Http)`: If the HTTP client cannot be built
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: Option<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::config("Groq API key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url
            .unwrap_or_else(|| GROQ_API_BASE.to_string())
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
        format!("{}/openai/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl WordProvider for GroqProvider {
    /// Send `prompt` as a single user message and return the completion text
    ///
    /// # API Call
    ///
    /// ```http
    /// POST /openai/v1/chat/completions
    /// Authorization: Bearer <key>
    /// ```
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        tracing::debug!("Requesting completion from Groq model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
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

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                Error::invalid_response("Groq response has no choices[0].message.content")
            })?;

        Ok(content.to_string())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating Groq providers
pub struct GroqFactory;

impl WordProviderFactory for GroqFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn WordProvider>> {
        match config {
            ProviderConfig::Groq {
                api_key,
                model,
                base_url,
            } => {
                config.validate()?;
                let provider = GroqProvider::new(api_key, model, base_url.clone())?;
                Ok(Box::new(provider))
            }
            _ => Err(Error::config("Invalid config for Groq provider")),
        }
    }
}

/// Register the Groq provider with a registry
pub fn register(registry: &mut ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(GroqFactory));
}
