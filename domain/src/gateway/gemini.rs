//! Generative language (Gemini) API client used for transcript summaries.

use log::*;
use serde_json::{json, Value};
use service::config::Config;

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};

/// Client for the generative language API.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client authenticating with the configured API key.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_key = config.gemini_api_key().ok_or_else(|| {
            warn!("Failed to get Gemini API key from config");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(
                    "GEMINI_API_KEY is not configured".to_string(),
                )),
            }
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        let mut key_header = reqwest::header::HeaderValue::from_str(&api_key).map_err(|err| {
            warn!("Failed to create Gemini key header: {err:?}");
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Invalid API key format".to_string(),
                )),
            }
        })?;
        key_header.set_sensitive(true);
        headers.insert("x-goog-api-key", key_header);
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.gemini_base_url().to_string(),
            model: config.gemini_model().to_string(),
        })
    }

    /// Run a single-prompt generation requesting a JSON-typed response.
    ///
    /// Returns the provider payload parsed as JSON, or the raw body as a
    /// string when it does not parse; `extract_text` understands both.
    pub async fn generate_content(&self, prompt: &str) -> Result<Value, Error> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "response_mime_type": "application/json" }
        });

        debug!("Requesting summary from model {}", self.model);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach the generative language API: {e:?}");
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!("Gemini returned {status}: {text}");
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Upstream {
                    status: status.as_u16(),
                    error: "Gemini error".to_string(),
                    details: text,
                }),
            });
        }

        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

/// Pulls the model's text output from the response payload.
///
/// The shape varies between success and partial/error variants: first
/// candidate -> first content part -> text, then a top-level `text` field,
/// then the payload itself.
pub fn extract_text(payload: &Value) -> String {
    if let Some(text) = payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
    {
        return text.to_string();
    }
    if let Some(text) = payload.get("text").and_then(Value::as_str) {
        return text.to_string();
    }
    match payload {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mockito::Matcher;

    fn test_config(base_url: &str) -> Config {
        Config::parse_from([
            "tubebrief",
            "--gemini-api-key",
            "gemini_key",
            "--gemini-base-url",
            base_url,
            "--gemini-model",
            "gemini-2.5-flash",
        ])
    }

    #[tokio::test]
    async fn requests_a_json_typed_response() {
        let mut server = mockito::Server::new_async().await;
        let config = test_config(&server.url());

        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "gemini_key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "parts": [{ "text": "summarize this" }] }],
                "generationConfig": { "response_mime_type": "application/json" }
            })))
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"{\"title\":\"T\"}"}]}}]}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&config).unwrap();
        let payload = client.generate_content("summarize this").await.unwrap();

        mock.assert_async().await;
        assert_eq!(extract_text(&payload), r#"{"title":"T"}"#);
    }

    #[tokio::test]
    async fn forwards_upstream_error_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let config = test_config(&server.url());

        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(429)
            .with_body(r#"{"error":{"message":"quota exceeded"}}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&config).unwrap();
        let err = client.generate_content("summarize this").await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Upstream {
                status: 429,
                error: "Gemini error".to_string(),
                details: r#"{"error":{"message":"quota exceeded"}}"#.to_string(),
            })
        );
    }

    #[test]
    fn extract_text_walks_the_candidate_path() {
        let payload = json!({
            "candidates": [{ "content": { "parts": [{ "text": "summary text" }] } }]
        });
        assert_eq!(extract_text(&payload), "summary text");
    }

    #[test]
    fn extract_text_falls_back_to_the_text_field() {
        assert_eq!(extract_text(&json!({ "text": "fallback" })), "fallback");
    }

    #[test]
    fn extract_text_passes_bare_strings_through() {
        assert_eq!(extract_text(&json!("raw body")), "raw body");
    }

    #[test]
    fn extract_text_stringifies_unknown_payloads() {
        assert_eq!(extract_text(&json!({ "odd": true })), r#"{"odd":true}"#);
    }
}
