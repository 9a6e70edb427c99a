//! RapidAPI transcript provider client.
//!
//! Transcript lookups go through a configured URL template rather than a
//! fixed endpoint, since each RapidAPI provider exposes its own path and
//! query layout.

use log::*;
use serde_json::Value;
use service::config::{Config, VIDEO_ID_PLACEHOLDER};

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};

/// Client for the RapidAPI-hosted transcript provider.
pub struct RapidApiClient {
    client: reqwest::Client,
    url_template: String,
}

impl RapidApiClient {
    /// Create a new client with the provider's auth headers applied to
    /// every request.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_key = config.rapidapi_key().ok_or_else(|| {
            warn!("Failed to get RapidAPI key from config");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(
                    "RAPIDAPI_KEY is not configured".to_string(),
                )),
            }
        })?;
        let host = config.rapidapi_host().ok_or_else(|| {
            warn!("Failed to get RapidAPI host from config");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(
                    "RAPIDAPI_HOST is not configured".to_string(),
                )),
            }
        })?;
        let url_template = config.rapidapi_url().ok_or_else(|| {
            warn!("Failed to get RapidAPI URL template from config");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(
                    "RAPIDAPI_URL is not configured".to_string(),
                )),
            }
        })?;

        let mut headers = reqwest::header::HeaderMap::new();

        let mut key_header = reqwest::header::HeaderValue::from_str(&api_key).map_err(|err| {
            warn!("Failed to create RapidAPI key header: {err:?}");
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Invalid API key format".to_string(),
                )),
            }
        })?;
        key_header.set_sensitive(true);
        headers.insert("x-rapidapi-key", key_header);

        let host_header = reqwest::header::HeaderValue::from_str(&host).map_err(|err| {
            warn!("Failed to create RapidAPI host header: {err:?}");
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Invalid host header format".to_string(),
                )),
            }
        })?;
        headers.insert("x-rapidapi-host", host_header);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            url_template,
        })
    }

    /// Fetch the raw transcript payload for a video.
    ///
    /// The URL template must carry the `{videoId}` placeholder; a template
    /// without it is a deployment misconfiguration, not a per-video
    /// failure. The body is returned as parsed JSON when the provider sends
    /// JSON and as a plain string otherwise, so normalization always has
    /// something to work with.
    pub async fn fetch_transcript(&self, video_id: &str) -> Result<Value, Error> {
        if !self.url_template.contains(VIDEO_ID_PLACEHOLDER) {
            error!("RAPIDAPI_URL is missing the {VIDEO_ID_PLACEHOLDER} placeholder");
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(format!(
                    "RAPIDAPI_URL must contain the {VIDEO_ID_PLACEHOLDER} placeholder"
                ))),
            });
        }

        let url = self
            .url_template
            .replace(VIDEO_ID_PLACEHOLDER, &urlencoding::encode(video_id));

        debug!("Fetching transcript for video: {video_id}");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Failed to reach the transcript provider: {e:?}");
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!("RapidAPI returned {status}: {body}");
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Upstream {
                    status: status.as_u16(),
                    error: "RapidAPI error".to_string(),
                    details: body,
                }),
            });
        }

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
