use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use examgen_server::app_state::AppState;
use examgen_server::config::Config;
use examgen_server::errors::{AppError, AppResult};
use examgen_server::models::domain::Question;
use examgen_server::services::ModelService;

const BOUNDARY: &str = "------------------------examgen-test-boundary";

/// Canned model: hands back its configured completion (or error) without
/// any network traffic.
pub struct StubModelService {
    response: AppResult<String>,
}

impl StubModelService {
    pub fn completing_with(payload: impl Into<String>) -> Self {
        Self {
            response: Ok(payload.into()),
        }
    }

    pub fn failing_with(error: AppError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[async_trait]
impl ModelService for StubModelService {
    async fn complete(&self, _system: &str, _user: &str) -> AppResult<String> {
        self.response.clone()
    }
}

/// Built directly so tests never read the process environment.
pub fn test_config() -> Config {
    Config {
        openai_api_key: SecretString::from("integration-test-key".to_string()),
        openai_model: "gpt-4o-mini".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 0,
    }
}

pub fn state_with(model: StubModelService) -> AppState {
    AppState::with_model_service(test_config(), Arc::new(model))
}

pub fn sample_questions() -> Vec<Question> {
    vec![
        Question::MultipleChoice {
            question: "Which gas do plants absorb during photosynthesis?".to_string(),
            options: vec![
                "Oxygen".to_string(),
                "Carbon dioxide".to_string(),
                "Nitrogen".to_string(),
            ],
            correct_answer_index: 1,
            explanation: "The text names carbon dioxide as the absorbed gas.".to_string(),
        },
        Question::TrueFalse {
            question: "Photosynthesis produces oxygen.".to_string(),
            correct_answer: true,
            explanation: "Oxygen is listed as a by-product.".to_string(),
        },
        Question::OpenEnded {
            question: "Summarize the role of chlorophyll.".to_string(),
            ideal_answer: "It captures light energy for the reaction.".to_string(),
            explanation: "The passage describes chlorophyll as the light absorber.".to_string(),
        },
    ]
}

pub fn questions_payload(questions: &[Question]) -> String {
    serde_json::json!({ "questions": questions }).to_string()
}

/// Hand-built multipart/form-data request: any text fields first, then
/// the document under the `file` part. Returns the content-type header
/// value and the body.
pub fn multipart_request(
    file_name: &str,
    mime: &str,
    file_bytes: &[u8],
    fields: &[(&str, &str)],
) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                name, value
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            file_name, mime
        )
        .as_bytes(),
    );
    body.extend_from_slice(file_bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let content_type = format!("multipart/form-data; boundary={}", BOUNDARY);
    (content_type, body)
}
