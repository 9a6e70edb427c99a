//! Summary generation: transcript lookup through our own API, prompt
//! construction, and the generative language call.

use log::*;
use serde::Serialize;
use serde_json::{json, Value};
use service::config::Config;

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use crate::gateway::gemini::{self, GeminiClient};
use crate::markdown::strip_markdown_fence;

/// Transcripts are cut to this many characters before prompting the model.
pub const TRANSCRIPT_CHAR_LIMIT: usize = 15_000;
/// Length of the transcript preview echoed back to the caller.
pub const PREVIEW_CHAR_LIMIT: usize = 1_000;

/// Summary response returned by `GET /api/summary`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub video_id: String,
    /// The model's parsed JSON summary, or `{"textRaw": ...}` when the
    /// output is not valid JSON.
    pub summary: Value,
    pub transcript_preview: String,
}

/// Generate a summary for `video_id`.
///
/// The transcript is fetched through this service's own transcript endpoint
/// at `own_base_url` rather than by calling the provider directly, so the
/// summary path inherits that endpoint's full error surface.
pub async fn generate(
    config: &Config,
    own_base_url: &str,
    video_id: &str,
) -> Result<Summary, Error> {
    let transcript = fetch_own_transcript(own_base_url, video_id).await?;
    let transcript = truncate_chars(&transcript, TRANSCRIPT_CHAR_LIMIT);

    let prompt = build_prompt(&transcript);
    let gemini = GeminiClient::new(config)?;
    let payload = gemini.generate_content(&prompt).await?;

    let text = strip_markdown_fence(&gemini::extract_text(&payload));
    let summary = serde_json::from_str(&text).unwrap_or_else(|_| json!({ "textRaw": text }));

    Ok(Summary {
        video_id: video_id.to_string(),
        transcript_preview: truncate_chars(&transcript, PREVIEW_CHAR_LIMIT),
        summary,
    })
}

/// Call our own `/api/transcript` endpoint and pull the normalized
/// transcript text out of its JSON body.
async fn fetch_own_transcript(base_url: &str, video_id: &str) -> Result<String, Error> {
    let url = format!(
        "{base_url}/api/transcript?videoId={}",
        urlencoding::encode(video_id)
    );

    debug!("Fetching transcript via internal endpoint: {url}");

    let response = reqwest::Client::new().get(&url).send().await.map_err(|e| {
        warn!("Internal transcript call failed: {e:?}");
        Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
        }
    })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        // Pass the transcript endpoint's own error response through untouched.
        return Err(Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Forwarded {
                status: status.as_u16(),
                body,
            }),
        });
    }

    let doc: Value = serde_json::from_str(&body).map_err(|e| {
        warn!("Transcript endpoint returned invalid JSON: {e:?}");
        Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Invalid JSON from the transcript endpoint".to_string(),
            )),
        }
    })?;

    Ok(doc
        .get("transcript")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

/// Builds the fixed summarization prompt with the transcript embedded
/// verbatim. The model is asked for strict JSON so its output can be
/// returned to the client as-is.
fn build_prompt(transcript: &str) -> String {
    format!(
        r#"Ты — ассистент, делающий краткое русскоязычное описание видео на основе транскрипта.
Верни СТРОГО JSON (без Markdown-ограждений) со структурой:
{{
  "title": "короткий заголовок (до 80 символов)",
  "summary": "3–5 предложений по сути, без воды",
  "bullets": ["3–6 тезисов"],
  "tags": ["до 8 ключевых тегов"],
  "language": "ru"
}}
Транскрипт:
"""{transcript}""""#
    )
}

/// Cuts `text` to at most `limit` characters, on a char boundary.
fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;

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

    fn gemini_candidate_body(text: &str) -> String {
        serde_json::to_string(&json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
        .unwrap()
    }

    #[test]
    fn prompt_embeds_the_transcript_and_schema() {
        let prompt = build_prompt("Hello world.");

        assert!(prompt.contains(r#""""Hello world.""""#));
        for key in ["\"title\"", "\"summary\"", "\"bullets\"", "\"tags\"", "\"language\": \"ru\""] {
            assert!(prompt.contains(key), "prompt is missing {key}");
        }
    }

    #[test]
    fn truncate_chars_cuts_on_char_boundaries() {
        assert_eq!(truncate_chars("привет", 4), "прив");
        assert_eq!(truncate_chars("short", 1_000), "short");

        let long = "a".repeat(TRANSCRIPT_CHAR_LIMIT + 500);
        assert_eq!(
            truncate_chars(&long, TRANSCRIPT_CHAR_LIMIT).chars().count(),
            TRANSCRIPT_CHAR_LIMIT
        );
    }

    #[tokio::test]
    async fn generates_a_summary_from_fenced_model_output() {
        let mut server = mockito::Server::new_async().await;
        let config = test_config(&server.url());

        let _transcript_mock = server
            .mock("GET", "/api/transcript?videoId=x")
            .with_status(200)
            .with_body(r#"{"videoId":"x","transcript":"Hello world.","raw":{}}"#)
            .create_async()
            .await;
        let _gemini_mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_body(gemini_candidate_body(
                "```json\n{\"title\":\"T\",\"summary\":\"S\",\"bullets\":[\"b1\"],\"tags\":[\"t1\"],\"language\":\"ru\"}\n```",
            ))
            .create_async()
            .await;

        let summary = generate(&config, &server.url(), "x").await.unwrap();

        assert_eq!(summary.video_id, "x");
        assert_eq!(summary.summary["title"], "T");
        assert_eq!(summary.summary["language"], "ru");
        assert_eq!(summary.transcript_preview, "Hello world.");
    }

    #[tokio::test]
    async fn wraps_non_json_model_output_as_text_raw() {
        let mut server = mockito::Server::new_async().await;
        let config = test_config(&server.url());

        let _transcript_mock = server
            .mock("GET", "/api/transcript?videoId=x")
            .with_status(200)
            .with_body(r#"{"videoId":"x","transcript":"Hello world.","raw":{}}"#)
            .create_async()
            .await;
        let _gemini_mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_body(gemini_candidate_body("Here is your summary"))
            .create_async()
            .await;

        let summary = generate(&config, &server.url(), "x").await.unwrap();

        assert_eq!(
            summary.summary,
            json!({ "textRaw": "Here is your summary" })
        );
    }

    #[tokio::test]
    async fn forwards_internal_transcript_failures_untouched() {
        let mut server = mockito::Server::new_async().await;
        let config = test_config(&server.url());

        let _transcript_mock = server
            .mock("GET", "/api/transcript?videoId=x")
            .with_status(404)
            .with_body(r#"{"error":"RapidAPI error","details":"no transcript"}"#)
            .create_async()
            .await;

        let err = generate(&config, &server.url(), "x").await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Forwarded {
                status: 404,
                body: r#"{"error":"RapidAPI error","details":"no transcript"}"#.to_string(),
            })
        );
    }
}
