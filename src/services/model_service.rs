use async_openai::config::OpenAIConfig;
use async_openai::Client;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Seam between the generation pipeline and the chat-completion provider.
/// Handlers and services hold this behind an `Arc<dyn ModelService>` so
/// tests can swap in a canned implementation.
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Run one chat completion and return the raw text of the first choice.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> AppResult<String>;
}

pub struct OpenAiModelService {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiModelService {
    pub fn new(config: &Config) -> Self {
        let client = Client::with_config(
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret()),
        );

        Self {
            client,
            model: config.openai_model.clone(),
        }
    }

    /// JSON mode is forced so the parser sees an object, not prose.
    /// Temperature is left at the provider default.
    fn chat_body(&self, system_prompt: &str, user_prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt }
            ],
            "response_format": { "type": "json_object" }
        })
    }
}

#[async_trait]
impl ModelService for OpenAiModelService {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> AppResult<String> {
        #[derive(Deserialize)]
        struct Completion {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct Message {
            content: Option<String>,
        }

        let body = self.chat_body(system_prompt, user_prompt);

        let completion: Completion = self
            .client
            .chat()
            .create_byot(body)
            .await
            .map_err(|err| AppError::UpstreamError(err.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::UpstreamError("The model returned an empty completion.".to_string())
            })
    }
}
