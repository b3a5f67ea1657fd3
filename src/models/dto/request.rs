use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use crate::constants::generation_prompt::{
    DEFAULT_QUESTION_COUNT, MAX_QUESTION_COUNT, MIN_SOURCE_CHARS,
};
use crate::errors::AppError;
use crate::models::domain::TestType;

/// Body of `POST /api/generate-test`. Browsers send `questionCount` as a
/// string, so it is parsed leniently; `testType` is a closed set and a
/// wrong value fails deserialization.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestRequest {
    #[validate(custom(
        function = validate_study_text,
        message = "Please provide at least 50 characters of study material."
    ))]
    pub text: String,

    #[serde(default)]
    pub test_type: Option<TestType>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub question_count: Option<i64>,
}

impl GenerateTestRequest {
    pub fn test_type(&self) -> TestType {
        self.test_type.unwrap_or(TestType::Mixed)
    }

    pub fn question_count(&self) -> u8 {
        clamp_question_count(self.question_count)
    }
}

fn validate_study_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().chars().count() < MIN_SOURCE_CHARS {
        return Err(ValidationError::new("study_text_too_short"));
    }
    Ok(())
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::Number(number) => number.as_i64(),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }))
}

/// Missing or unparseable counts fall back to the default; numbers clamp
/// to the accepted range.
pub fn clamp_question_count(raw: Option<i64>) -> u8 {
    raw.unwrap_or(i64::from(DEFAULT_QUESTION_COUNT))
        .clamp(1, i64::from(MAX_QUESTION_COUNT)) as u8
}

pub fn parse_question_count(raw: Option<&str>) -> u8 {
    clamp_question_count(raw.and_then(|value| value.trim().parse().ok()))
}

pub fn parse_test_type(raw: Option<&str>) -> Result<TestType, AppError> {
    match raw {
        None => Ok(TestType::Mixed),
        Some(value) => value
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Invalid test type '{}'.", value))),
    }
}

/// Multipart body of `POST /api/upload-and-generate`: the document under
/// the `file` part plus the same type/count fields as the JSON route,
/// arriving as text parts.
#[derive(Debug, MultipartForm)]
pub struct UploadForm {
    pub file: TempFile,

    #[multipart(rename = "testType")]
    pub test_type: Option<Text<String>>,

    #[multipart(rename = "questionCount")]
    pub question_count: Option<Text<String>>,
}

impl UploadForm {
    pub fn test_type(&self) -> Result<TestType, AppError> {
        parse_test_type(self.test_type.as_ref().map(|text| text.as_str()))
    }

    pub fn question_count(&self) -> u8 {
        parse_question_count(self.question_count.as_ref().map(|text| text.as_str()))
    }
}
