use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of test a caller can ask for. `Mixed` means all three question
/// types, shuffled before delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    MultipleChoice,
    TrueFalse,
    OpenEnded,
    Mixed,
}

impl TestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::MultipleChoice => "multiple_choice",
            TestType::TrueFalse => "true_false",
            TestType::OpenEnded => "open_ended",
            TestType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "multiple_choice" => Ok(TestType::MultipleChoice),
            "true_false" => Ok(TestType::TrueFalse),
            "open_ended" => Ok(TestType::OpenEnded),
            "mixed" => Ok(TestType::Mixed),
            other => Err(format!("unknown test type '{}'", other)),
        }
    }
}

/// A single generated question, tagged by `type` on the wire.
///
/// Decoding through this enum is the first validation gate: a record with
/// an unknown tag, missing fields, or wrongly-typed fields fails to
/// deserialize. [`Question::validate`] covers the value-level checks serde
/// cannot express.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    #[serde(rename_all = "camelCase")]
    MultipleChoice {
        question: String,
        options: Vec<String>,
        correct_answer_index: usize,
        explanation: String,
    },
    #[serde(rename_all = "camelCase")]
    TrueFalse {
        question: String,
        correct_answer: bool,
        explanation: String,
    },
    #[serde(rename_all = "camelCase")]
    OpenEnded {
        question: String,
        ideal_answer: String,
        explanation: String,
    },
}

impl Question {
    pub fn question_text(&self) -> &str {
        match self {
            Question::MultipleChoice { question, .. } => question,
            Question::TrueFalse { question, .. } => question,
            Question::OpenEnded { question, .. } => question,
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            Question::MultipleChoice { explanation, .. } => explanation,
            Question::TrueFalse { explanation, .. } => explanation,
            Question::OpenEnded { explanation, .. } => explanation,
        }
    }

    /// Open-ended questions are shown with the ideal answer for
    /// self-assessment and never counted in the score.
    pub fn is_graded(&self) -> bool {
        !matches!(self, Question::OpenEnded { .. })
    }

    /// Value-level checks applied after a successful decode. A failing
    /// record is dropped by the response parser, not surfaced to the
    /// caller.
    pub fn validate(&self) -> Result<(), String> {
        if self.question_text().trim().is_empty() {
            return Err("question text is blank".to_string());
        }
        if self.explanation().trim().is_empty() {
            return Err("explanation is blank".to_string());
        }

        match self {
            Question::MultipleChoice {
                options,
                correct_answer_index,
                ..
            } => {
                if options.len() < 2 {
                    return Err(format!(
                        "multiple choice needs at least 2 options, got {}",
                        options.len()
                    ));
                }
                if *correct_answer_index >= options.len() {
                    return Err(format!(
                        "correctAnswerIndex {} is out of range for {} options",
                        correct_answer_index,
                        options.len()
                    ));
                }
            }
            Question::TrueFalse { .. } => {}
            Question::OpenEnded { ideal_answer, .. } => {
                if ideal_answer.trim().is_empty() {
                    return Err("idealAnswer is blank".to_string());
                }
            }
        }

        Ok(())
    }
}
