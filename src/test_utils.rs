#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::Question;

    /// Three options with the correct one at index 1.
    pub fn sample_multiple_choice() -> Question {
        Question::MultipleChoice {
            question: "Which process releases oxygen into the atmosphere?".to_string(),
            options: vec![
                "Respiration".to_string(),
                "Photosynthesis".to_string(),
                "Fermentation".to_string(),
            ],
            correct_answer_index: 1,
            explanation: "The text says photosynthesis produces oxygen as a by-product."
                .to_string(),
        }
    }

    pub fn sample_true_false() -> Question {
        Question::TrueFalse {
            question: "Plants absorb carbon dioxide during photosynthesis.".to_string(),
            correct_answer: true,
            explanation: "The material states carbon dioxide is taken in through the stomata."
                .to_string(),
        }
    }

    pub fn sample_open_ended() -> Question {
        Question::OpenEnded {
            question: "Describe the role of sunlight in photosynthesis.".to_string(),
            ideal_answer: "Sunlight provides the energy that drives the reaction.".to_string(),
            explanation: "The passage calls sunlight the energy source of the process."
                .to_string(),
        }
    }

    /// One question of each type, in a fixed order tests can rely on.
    pub fn sample_questions() -> Vec<Question> {
        vec![
            sample_multiple_choice(),
            sample_true_false(),
            sample_open_ended(),
        ]
    }

    /// A provider-shaped completion wrapping the given questions.
    pub fn provider_payload(questions: &[Question]) -> String {
        serde_json::json!({ "questions": questions }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::Question;

    #[test]
    fn test_fixtures_cover_all_three_types() {
        let questions = sample_questions();
        assert_eq!(questions.len(), 3);
        assert!(matches!(questions[0], Question::MultipleChoice { .. }));
        assert!(matches!(questions[1], Question::TrueFalse { .. }));
        assert!(matches!(questions[2], Question::OpenEnded { .. }));

        for question in &questions {
            assert!(question.validate().is_ok());
        }
    }

    #[test]
    fn test_provider_payload_parses_back() {
        let payload = provider_payload(&sample_questions());
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["questions"].as_array().unwrap().len(), 3);
    }
}
