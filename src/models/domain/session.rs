use thiserror::Error;

use crate::models::domain::question::Question;

/// An answer as stored in the session, already coerced to the shape of
/// its question.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedAnswer {
    /// Option index for a multiple-choice question.
    Choice(usize),
    /// Choice for a true/false question.
    Bool(bool),
    /// Trimmed free text for an open-ended question.
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// The question at this index is on screen waiting for submit or skip.
    AwaitingAnswer(usize),
    /// Every question has a recorded answer.
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a quiz session needs at least one question")]
    NoQuestions,

    #[error("an answer is required; submit one or skip the question")]
    AnswerRequired,

    #[error("invalid answer: {0}")]
    InvalidAnswer(String),

    #[error("the quiz is already complete")]
    AlreadyCompleted,
}

/// How a single question turned out in the final report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// Open-ended questions are self-assessed, never machine-scored.
    NotGraded,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportEntry {
    pub index: usize,
    pub question: Question,
    pub answer: Option<RecordedAnswer>,
    pub verdict: Verdict,
}

/// Final score: `correct` out of `graded`, where `graded` counts every
/// question except the open-ended ones.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreReport {
    pub entries: Vec<ReportEntry>,
    pub correct: usize,
    pub graded: usize,
}

/// One quiz run over a fixed question list.
///
/// The session walks the list sequentially; a skipped question stays
/// unanswered and comes back around after the end of the list, so the
/// session only completes once every slot holds an answer. Restarting is
/// dropping the session and building a new one from a fresh generation.
#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: Vec<Option<RecordedAnswer>>,
    state: SessionState,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            answers,
            state: SessionState::AwaitingAnswer(0),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<RecordedAnswer>] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::AwaitingAnswer(index) => Some(index),
            SessionState::Completed => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().map(|index| &self.questions[index])
    }

    /// Record an answer for the active question and move on.
    ///
    /// `raw` is the untyped user input: the decimal option index for
    /// multiple choice, `true`/`false` for true/false, free text for
    /// open-ended. A missing or blank input is rejected without a state
    /// change, as is input that cannot be coerced to the question's type.
    pub fn submit(&mut self, raw: Option<&str>) -> Result<SessionState, SessionError> {
        let index = self.current_index().ok_or(SessionError::AlreadyCompleted)?;

        let raw = raw.map(str::trim).filter(|value| !value.is_empty());
        let raw = raw.ok_or(SessionError::AnswerRequired)?;

        let answer = match &self.questions[index] {
            Question::MultipleChoice { options, .. } => {
                let choice: usize = raw
                    .parse()
                    .map_err(|_| SessionError::InvalidAnswer(format!("'{}' is not an option index", raw)))?;
                if choice >= options.len() {
                    return Err(SessionError::InvalidAnswer(format!(
                        "option index {} is out of range for {} options",
                        choice,
                        options.len()
                    )));
                }
                RecordedAnswer::Choice(choice)
            }
            Question::TrueFalse { .. } => match raw {
                "true" => RecordedAnswer::Bool(true),
                "false" => RecordedAnswer::Bool(false),
                other => {
                    return Err(SessionError::InvalidAnswer(format!(
                        "'{}' is neither 'true' nor 'false'",
                        other
                    )))
                }
            },
            Question::OpenEnded { .. } => RecordedAnswer::Text(raw.to_string()),
        };

        self.answers[index] = Some(answer);
        self.advance(index);
        Ok(self.state)
    }

    /// Move past the active question without recording anything. The slot
    /// stays unanswered and will be presented again once the end of the
    /// list is reached.
    pub fn skip(&mut self) -> Result<SessionState, SessionError> {
        let index = self.current_index().ok_or(SessionError::AlreadyCompleted)?;
        self.advance(index);
        Ok(self.state)
    }

    /// Two-phase lookup for the next unanswered slot: first forward from
    /// the slot after `from`, then from the start of the list (catching
    /// anything skipped earlier, possibly `from` itself). No unanswered
    /// slot anywhere means the session is complete.
    fn advance(&mut self, from: usize) {
        let forward = self
            .answers
            .iter()
            .skip(from + 1)
            .position(Option::is_none)
            .map(|offset| from + 1 + offset);

        let next = forward.or_else(|| self.answers.iter().position(Option::is_none));

        self.state = match next {
            Some(index) => SessionState::AwaitingAnswer(index),
            None => SessionState::Completed,
        };
    }

    /// Per-question verdicts and the overall `correct / graded` count.
    /// Open-ended entries carry the recorded text so a renderer can show
    /// it beside the ideal answer.
    pub fn score_report(&self) -> ScoreReport {
        let mut entries = Vec::with_capacity(self.questions.len());
        let mut correct = 0;
        let mut graded = 0;

        for (index, (question, answer)) in self.questions.iter().zip(&self.answers).enumerate() {
            let verdict = match question {
                Question::MultipleChoice {
                    correct_answer_index,
                    ..
                } => {
                    graded += 1;
                    match answer {
                        Some(RecordedAnswer::Choice(choice)) if choice == correct_answer_index => {
                            Verdict::Correct
                        }
                        _ => Verdict::Incorrect,
                    }
                }
                Question::TrueFalse { correct_answer, .. } => {
                    graded += 1;
                    match answer {
                        Some(RecordedAnswer::Bool(value)) if value == correct_answer => {
                            Verdict::Correct
                        }
                        _ => Verdict::Incorrect,
                    }
                }
                Question::OpenEnded { .. } => Verdict::NotGraded,
            };

            if verdict == Verdict::Correct {
                correct += 1;
            }

            entries.push(ReportEntry {
                index,
                question: question.clone(),
                answer: answer.clone(),
                verdict,
            });
        }

        ScoreReport {
            entries,
            correct,
            graded,
        }
    }
}
