pub mod extraction_service;
pub mod generation_service;
pub mod model_service;
pub mod prompt_builder;
pub mod response_parser;

pub use generation_service::GenerationService;
pub use model_service::{ModelService, OpenAiModelService};
