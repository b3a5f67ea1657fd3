pub mod question;
pub mod session;

pub use question::{Question, TestType};
pub use session::{QuizSession, RecordedAnswer, ScoreReport, SessionError, SessionState, Verdict};
