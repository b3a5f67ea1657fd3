use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::models::domain::Question;

/// Widest brace-to-brace span, across newlines. Recovers the payload when
/// the model wraps its JSON in prose or a markdown fence.
static JSON_OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON_OBJECT_RE is a valid pattern"));

/// How much raw model output gets echoed into error logs.
const LOGGED_OUTPUT_CHARS: usize = 300;

/// Decode a model completion into validated questions.
///
/// Records that fail to decode or validate are dropped with a warning
/// rather than failing the batch, so one malformed record cannot ruin an
/// otherwise usable test. An empty result is still a success.
pub fn parse_questions(raw: &str) -> AppResult<Vec<Question>> {
    let Some(payload) = extract_json_object(raw) else {
        log::error!("model output is not parseable JSON: {:?}", head(raw));
        return Err(AppError::UpstreamError(
            "The model returned a response that could not be parsed.".to_string(),
        ));
    };

    let Some(records) = payload.get("questions").and_then(Value::as_array) else {
        log::error!("model output has no questions array: {:?}", head(raw));
        return Err(AppError::UpstreamError(
            "The model response did not contain a questions array.".to_string(),
        ));
    };

    let mut questions = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<Question>(record.clone()) {
            Ok(question) => match question.validate() {
                Ok(()) => questions.push(question),
                Err(reason) => log::warn!("dropping invalid question ({}): {}", reason, record),
            },
            Err(err) => log::warn!("dropping undecodable question ({}): {}", err, record),
        }
    }

    Ok(questions)
}

/// Direct parse first, then the first brace-delimited span as a fallback.
fn extract_json_object(raw: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return Some(value);
    }
    let candidate = JSON_OBJECT_RE.find(raw)?;
    serde_json::from_str(candidate.as_str()).ok()
}

fn head(raw: &str) -> &str {
    match raw.char_indices().nth(LOGGED_OUTPUT_CHARS) {
        Some((byte_index, _)) => &raw[..byte_index],
        None => raw,
    }
}
