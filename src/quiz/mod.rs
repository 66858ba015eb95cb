//! Quiz progression: answering, navigating, scoring and reviewing.
//!
//! A [`QuizSession`] is paired with the current [`QuizDocument`] and only
//! changes through [`QuizSession::apply`] and its named transitions.
//!
//! [`QuizDocument`]: crate::document::QuizDocument

mod machine;
mod results;
mod session;

pub use machine::{QuizAction, Renormalization, Transition};
pub use results::{percent, results, score, AnswerOutcome, QuestionReview, QuizResults};
pub use session::{Phase, QuizSession};
