use serde::Deserialize;
use serde_json::Value;

use crate::SummarizeError;

/// Shown for a JSON error body that carries no usable `detail`.
pub const STRUCTURED_ERROR_FALLBACK: &str = "Failed to fetch summary";
/// Characters of a non-JSON error body kept in the message.
pub const ERROR_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

/// Classifies a completed HTTP exchange into a summary or an error.
///
/// 2xx bodies must be `{"summary": "..."}`. Other statuses use the `detail`
/// field of a JSON body when the content type says JSON, else the start of the
/// body text.
pub fn interpret_response(
    status: u16,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<String, SummarizeError> {
    if (200..300).contains(&status) {
        return serde_json::from_slice::<SummaryResponse>(body)
            .map(|response| response.summary)
            .map_err(|err| SummarizeError::MalformedResponse(err.to_string()));
    }

    if content_type.is_some_and(is_json_content_type) {
        // An unreadable JSON error body counts as an empty object.
        let value = serde_json::from_slice::<Value>(body).unwrap_or(Value::Null);
        let message =
            detail_message(&value).unwrap_or_else(|| STRUCTURED_ERROR_FALLBACK.to_string());
        return Err(SummarizeError::Backend { status, message });
    }

    let text = String::from_utf8_lossy(body);
    Err(SummarizeError::ServerError {
        status,
        excerpt: text.chars().take(ERROR_EXCERPT_CHARS).collect(),
    })
}

pub fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .contains("application/json")
}

fn detail_message(value: &Value) -> Option<String> {
    let detail = value.get("detail")?;
    match detail {
        Value::Null => None,
        Value::String(text) => (!text.is_empty()).then(|| text.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        _ => Some(detail.to_string()),
    }
}
