// # X Poster
//
// Posting client for the X (Twitter) API v2, authenticated with OAuth 1.0a
// user-context credentials.
//
// - One `POST /2/tweets` per call, no retries
// - Replies carry `reply.in_reply_to_tweet_id`
// - HTTP timeout of 30 seconds
// - Credentials never appear in logs or `Debug` output
//
// Without credentials the binary does not build an `XPoster` at all; the
// core `PostingClient` then logs posts instead of sending them.

pub mod oauth;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wordbot_core::config::PosterConfig;
use wordbot_core::traits::Poster;
use wordbot_core::types::PostReceipt;
use wordbot_core::{Error, Result};

pub use oauth::OAuthCredentials;

/// X API base URL
pub const X_API_BASE: &str = "https://api.x.com";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const POSTER_NAME: &str = "x";

#[derive(Debug, Serialize)]
struct CreatePostRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<ReplySettings<'a>>,
}

#[derive(Debug, Serialize)]
struct ReplySettings<'a> {
    in_reply_to_tweet_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
}

/// Public URL for a post id
///
/// `i/web/status` redirects to the canonical URL without knowing the
/// account's handle.
pub fn status_url(id: &str) -> String {
    format!("https://x.com/i/web/status/{}", id)
}

/// X API v2 poster
#[derive(Debug)]
pub struct XPoster {
    credentials: OAuthCredentials,

    /// API base URL without trailing slash
    base_url: String,

    client: reqwest::Client,
}

impl XPoster {
    /// Create a new X poster
    ///
    /// # Parameters
    ///
    /// - `credentials`: OAuth 1.0a consumer and access token pairs
    /// - `base_url`: Optional API base URL (defaults to [`X_API_BASE`])
    pub fn new(credentials: OAuthCredentials, base_url: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url
            .unwrap_or_else(|| X_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            credentials,
            base_url,
            client,
        })
    }

    /// Create a poster from a validated [`PosterConfig::X`]
    pub fn from_config(config: &PosterConfig) -> Result<Self> {
        config.validate()?;

        let PosterConfig::X {
            consumer_key,
            consumer_secret,
            access_token,
            access_token_secret,
            base_url,
        } = config;

        let credentials = OAuthCredentials {
            consumer_key: consumer_key.clone(),
            consumer_secret: consumer_secret.clone(),
            access_token: access_token.clone(),
            access_token_secret: access_token_secret.clone(),
        };

        tracing::info!("Authenticated with X API (OAuth 1.0a user context).");
        Self::new(credentials, base_url.clone())
    }

    fn endpoint(&self) -> String {
        format!("{}/2/tweets", self.base_url)
    }
}

#[async_trait]
impl Poster for XPoster {
    async fn create_post(&self, text: &str, reply_to_id: Option<&str>) -> Result<PostReceipt> {
        let url = self.endpoint();
        let authorization = self.credentials.authorization_header("POST", &url)?;

        let body = CreatePostRequest {
            text,
            reply: reply_to_id.map(|id| ReplySettings {
                in_reply_to_tweet_id: id,
            }),
        };

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::poster(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            if status.as_u16() == 403 {
                tracing::error!(
                    "X rejected the post with 403 Forbidden. The access token is probably read-only: \
                     enable 'Read and Write' app permissions, then regenerate the access token and secret."
                );
            }
            return Err(Error::from_status(POSTER_NAME, status.as_u16(), &error_text));
        }

        let created: CreatePostResponse = response
            .json()
            .await
            .map_err(|e| Error::invalid_response(format!("Unexpected X response: {}", e)))?;

        let id = created.data.id;
        Ok(PostReceipt {
            url: Some(status_url(&id)),
            id,
        })
    }

    fn poster_name(&self) -> &'static str {
        POSTER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: Option<String>) -> PosterConfig {
        PosterConfig::X {
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            access_token: "at".to_string(),
            access_token_secret: "ats".to_string(),
            base_url,
        }
    }

    #[test]
    fn test_from_config_requires_every_credential() {
        let incomplete = PosterConfig::X {
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            access_token: "".to_string(),
            access_token_secret: "ats".to_string(),
            base_url: None,
        };
        assert!(XPoster::from_config(&incomplete).is_err());
        assert!(XPoster::from_config(&config(None)).is_ok());
    }

    #[test]
    fn test_debug_hides_credentials() {
        let poster = XPoster::from_config(&config(None)).unwrap();
        let debug = format!("{:?}", poster);
        assert!(!debug.contains("\"cs\""));
        assert!(debug.contains("REDACTED"));
    }

    #[tokio::test]
    async fn test_create_post() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .and(header_exists("authorization"))
            .and(body_json(serde_json::json!({"text": "LACONIC"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": {"id": "1850000000000000001", "text": "LACONIC"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let poster = XPoster::from_config(&config(Some(server.uri()))).unwrap();
        let receipt = poster.create_post("LACONIC", None).await.unwrap();

        assert_eq!(receipt.id, "1850000000000000001");
        assert_eq!(
            receipt.url.as_deref(),
            Some("https://x.com/i/web/status/1850000000000000001")
        );
    }

    #[tokio::test]
    async fn test_create_reply() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .and(body_json(serde_json::json!({
                "text": "Try 'use'.",
                "reply": {"in_reply_to_tweet_id": "42"}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": {"id": "43", "text": "Try 'use'."}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let poster = XPoster::from_config(&config(Some(server.uri()))).unwrap();
        let receipt = poster.create_post("Try 'use'.", Some("42")).await.unwrap();
        assert_eq!(receipt.id, "43");
    }

    #[tokio::test]
    async fn test_forbidden_is_authentication_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "title": "Forbidden",
                "detail": "You are not permitted to perform this action."
            })))
            .mount(&server)
            .await;

        let poster = XPoster::from_config(&config(Some(server.uri()))).unwrap();
        let err = poster.create_post("hello", None).await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"errors": []})))
            .mount(&server)
            .await;

        let poster = XPoster::from_config(&config(Some(server.uri()))).unwrap();
        let err = poster.create_post("hello", None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }
}
