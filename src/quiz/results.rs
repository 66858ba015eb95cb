//! Scoring and result review.

use super::session::QuizSession;
use crate::document::QuizDocument;
use std::collections::BTreeMap;

/// Count the questions whose recorded answer is the correct option.
///
/// Unanswered questions never match.
pub fn score(document: &QuizDocument, answers: &BTreeMap<usize, usize>) -> usize {
    document
        .questions
        .iter()
        .enumerate()
        .filter(|(index, question)| answers.get(index) == Some(&question.correct_option))
        .count()
}

/// Round `score / total` to a whole percentage, halves rounding up.
pub const fn percent(score: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (score * 200 + total) / (total * 2)
}

/// How a single question was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The chosen option is correct.
    Correct,
    /// The chosen option is wrong.
    Incorrect,
    /// No option was chosen; counts as incorrect.
    Unanswered,
}

/// Review line for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionReview {
    /// Question index.
    pub index: usize,
    /// Option the user chose.
    pub chosen: Option<usize>,
    /// The correct option.
    pub correct: usize,
    /// Outcome of the question.
    pub outcome: AnswerOutcome,
}

impl QuestionReview {
    /// Check whether the question was answered correctly.
    pub fn is_correct(&self) -> bool {
        self.outcome == AnswerOutcome::Correct
    }
}

/// Summary of a finished attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    /// Recorded score.
    pub score: usize,
    /// Number of questions.
    pub total: usize,
    /// Rounded percentage.
    pub percent: usize,
    /// Per-question review.
    pub reviews: Vec<QuestionReview>,
}

/// Build the results summary for a session against its document.
pub fn results(document: &QuizDocument, session: &QuizSession) -> QuizResults {
    let reviews = document
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let chosen = session.answer(index);
            let outcome = match chosen {
                None => AnswerOutcome::Unanswered,
                Some(option) if question.is_correct(option) => AnswerOutcome::Correct,
                Some(_) => AnswerOutcome::Incorrect,
            };
            QuestionReview {
                index,
                chosen,
                correct: question.correct_option,
                outcome,
            }
        })
        .collect();

    let total = document.len();
    QuizResults {
        score: session.score(),
        total,
        percent: percent(session.score(), total),
        reviews,
    }
}
