//! Markdown helpers for model-generated text.

/// Removes a Markdown code fence wrapping `raw`, if present.
///
/// Model output often arrives as ` ```json ... ``` ` even when strict JSON
/// was requested. Empty input is returned untouched; anything else is
/// trimmed and, when fenced, unwrapped before a JSON parse attempt.
pub fn strip_markdown_fence(raw: &str) -> String {
    if raw.is_empty() {
        return raw.to_string();
    }

    let mut cleaned = raw.trim();
    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
        if let Some(tag) = cleaned.get(..4) {
            if tag.eq_ignore_ascii_case("json") {
                cleaned = cleaned[4..].trim_start();
            }
        }
        cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned);
        cleaned = cleaned.trim();
    }
    cleaned.to_string()
}
