use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::AppResult;
use crate::models::domain::{Question, TestType};
use crate::services::model_service::ModelService;
use crate::services::prompt_builder::build_generation_prompt;
use crate::services::response_parser::parse_questions;

/// Drives the whole pipeline: prompt assembly, the model call, response
/// validation and final ordering.
pub struct GenerationService {
    model: Arc<dyn ModelService>,
}

impl GenerationService {
    pub fn new(model: Arc<dyn ModelService>) -> Self {
        Self { model }
    }

    /// Inputs are expected to be validated and clamped by the request
    /// layer. The returned list may be shorter than `question_count`, or
    /// empty, when the model under-delivers.
    pub async fn generate(
        &self,
        source_text: &str,
        test_type: TestType,
        question_count: u8,
    ) -> AppResult<Vec<Question>> {
        let prompt = build_generation_prompt(source_text, test_type, question_count);
        log::info!(
            "requesting {} '{}' question(s) from {} chars of material",
            question_count,
            test_type,
            source_text.chars().count()
        );

        let completion = self.model.complete(&prompt.system, &prompt.user).await?;
        let mut questions = parse_questions(&completion)?;

        shuffle_for_delivery(&mut questions, test_type, &mut rand::thread_rng());

        log::info!("delivering {} validated question(s)", questions.len());
        Ok(questions)
    }
}

/// Mixed tests are served in random order so the three types interleave;
/// single-type tests keep the model's order.
fn shuffle_for_delivery<R: Rng>(questions: &mut [Question], test_type: TestType, rng: &mut R) {
    if test_type == TestType::Mixed {
        questions.shuffle(rng);
    }
}
