use std::sync::Arc;

use crate::{
    config::Config,
    services::{GenerationService, ModelService, OpenAiModelService},
};

#[derive(Clone)]
pub struct AppState {
    pub generation_service: Arc<GenerationService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let model = Arc::new(OpenAiModelService::new(&config));
        Self::with_model_service(config, model)
    }

    /// Wires the pipeline onto a caller-supplied model, so tests can run
    /// the real handlers against a canned completion.
    pub fn with_model_service(config: Config, model: Arc<dyn ModelService>) -> Self {
        Self {
            generation_service: Arc::new(GenerationService::new(model)),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_builds_from_config() {
        let state = AppState::new(Config::test_config());
        assert_eq!(state.config.openai_model, "gpt-4o-mini");
    }
}
