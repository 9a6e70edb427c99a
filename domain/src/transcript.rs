//! Transcript retrieval and normalization.

use log::*;
use serde::Serialize;
use serde_json::Value;
use service::config::Config;

use crate::error::Error;
use crate::gateway::rapid_api::RapidApiClient;

/// Transcript response returned by `GET /api/transcript`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub video_id: String,
    /// Normalized plain-text transcript; always a string, whatever shape the
    /// upstream returned.
    pub transcript: String,
    /// The parsed (or raw-text) upstream payload, included for caller
    /// inspection.
    pub raw: Value,
}

/// The known transcript payload shapes, in priority order. Transcript
/// providers disagree on the wire format, so the payload is classified
/// first and flattened second.
#[derive(Debug)]
enum TranscriptShape {
    /// `{"transcript": "..."}`, the most specific signal; always wins.
    Keyed(String),
    /// A top-level array of cue objects carrying `text`.
    Cues(Vec<String>),
    /// `{"segments": [{"text": ...}, ...]}`
    Segments(Vec<String>),
    /// `{"subtitles": [...]}` with `subtitle` preferred over `text` per element.
    Subtitles(Vec<String>),
    /// Already plain text.
    Plain(String),
    /// Nothing matched; degrade to showing the raw structure.
    Unknown(Value),
}

impl TranscriptShape {
    fn classify(payload: &Value) -> TranscriptShape {
        if let Some(text) = payload.get("transcript").and_then(Value::as_str) {
            return TranscriptShape::Keyed(text.to_string());
        }
        if let Some(cues) = payload.as_array() {
            let first_has_text = cues
                .first()
                .and_then(|cue| cue.get("text"))
                .and_then(Value::as_str)
                .is_some();
            if first_has_text {
                return TranscriptShape::Cues(collect_texts(cues, &["text"]));
            }
        }
        if let Some(segments) = payload.get("segments").and_then(Value::as_array) {
            return TranscriptShape::Segments(collect_texts(segments, &["text"]));
        }
        if let Some(subtitles) = payload.get("subtitles").and_then(Value::as_array) {
            return TranscriptShape::Subtitles(collect_texts(subtitles, &["subtitle", "text"]));
        }
        if let Some(text) = payload.as_str() {
            return TranscriptShape::Plain(text.to_string());
        }
        TranscriptShape::Unknown(payload.clone())
    }

    fn into_text(self) -> String {
        match self {
            TranscriptShape::Keyed(text) | TranscriptShape::Plain(text) => text,
            TranscriptShape::Cues(parts)
            | TranscriptShape::Segments(parts)
            | TranscriptShape::Subtitles(parts) => parts.join(" ").trim().to_string(),
            TranscriptShape::Unknown(payload) => payload.to_string(),
        }
    }
}

/// Takes the first present string field from `keys` for each element,
/// empty when none match.
fn collect_texts(items: &[Value], keys: &[&str]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            keys.iter()
                .find_map(|key| item.get(key).and_then(Value::as_str))
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

/// Flattens whatever payload the transcript upstream returned into a single
/// plain-text string. Never fails; unknown shapes degrade to their JSON
/// serialization.
pub fn normalize(payload: &Value) -> String {
    TranscriptShape::classify(payload).into_text()
}

/// Fetch the transcript for `video_id` from the upstream provider and
/// normalize it.
pub async fn fetch(config: &Config, video_id: &str) -> Result<Transcript, Error> {
    let client = RapidApiClient::new(config)?;
    let raw = client.fetch_transcript(video_id).await?;
    let transcript = normalize(&raw);

    debug!(
        "Normalized transcript for {video_id}: {} chars",
        transcript.len()
    );

    Ok(Transcript {
        video_id: video_id.to_string(),
        transcript,
        raw,
    })
}
