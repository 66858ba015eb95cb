//! Quiz progression state machine.
//!
//! ```text
//!              select_answer (not last)
//!              ┌──────────────┐
//!              ▼              │
//! ┌─────────────────────────┐ │   select_answer (last)   ┌─────────┐
//! │ Answering(current)      │─┴────────────────────────▶ │ Results │
//! └─────────────────────────┘ ◀──────────────────────────└─────────┘
//!                                    go_to_question
//! ```
//!
//! Every transition validates indices against the document passed in, not
//! against bounds cached from an earlier revision. A rejected transition
//! leaves the session untouched.

use super::results::score;
use super::session::QuizSession;
use crate::document::QuizDocument;
use crate::error::TransitionError;
use tracing::debug;

/// A user interaction with the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizAction {
    /// Choose an option for the displayed question.
    SelectAnswer(usize),
    /// Jump to a question.
    GoToQuestion(usize),
    /// Go to the previous question.
    Previous,
    /// Go to the next question.
    Next,
    /// Start over.
    Reset,
}

/// Effect of an accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// An answer was recorded and the next question is displayed.
    Advanced {
        /// Question that was answered.
        answered: usize,
        /// Question now displayed.
        next: usize,
    },
    /// The last question was answered and results are shown.
    Completed {
        /// Final score.
        score: usize,
        /// Number of questions.
        total: usize,
    },
    /// The displayed question changed.
    Moved {
        /// Question now displayed.
        to: usize,
    },
    /// The session returned to its initial state.
    Reset,
}

/// Changes made when re-pairing a session with a reshaped document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Renormalization {
    /// Answers removed because their question or option vanished.
    pub dropped_answers: usize,
    /// Whether the displayed question was moved back into range.
    pub clamped: bool,
    /// Whether the revealed score changed.
    pub rescored: bool,
}

impl Renormalization {
    /// Check if anything changed.
    pub const fn is_noop(&self) -> bool {
        self.dropped_answers == 0 && !self.clamped && !self.rescored
    }
}

impl QuizSession {
    /// Apply an action against the current document.
    pub fn apply(
        &mut self,
        document: &QuizDocument,
        action: QuizAction,
    ) -> Result<Transition, TransitionError> {
        match action {
            QuizAction::SelectAnswer(option) => self.select_answer(document, option),
            QuizAction::GoToQuestion(index) => self.go_to_question(document, index),
            QuizAction::Previous => self.previous(document),
            QuizAction::Next => self.next(document),
            QuizAction::Reset => Ok(self.reset()),
        }
    }

    /// Record an answer for the displayed question.
    ///
    /// Answering the last question computes the score and shows results;
    /// any other question advances to the next one.
    pub fn select_answer(
        &mut self,
        document: &QuizDocument,
        option: usize,
    ) -> Result<Transition, TransitionError> {
        if self.results_revealed {
            return Err(TransitionError::ResultsShown);
        }

        let current = self.current_question;
        let question = document
            .question(current)
            .ok_or(TransitionError::QuestionOutOfRange {
                index: current,
                total: document.len(),
            })?;
        if option >= question.options.len() {
            return Err(TransitionError::OptionOutOfRange {
                question: current,
                option,
                options: question.options.len(),
            });
        }

        self.answers.insert(current, option);

        if Some(current) == document.last_index() {
            self.score = score(document, &self.answers);
            self.results_revealed = true;
            debug!(score = self.score, total = document.len(), "quiz completed");
            Ok(Transition::Completed {
                score: self.score,
                total: document.len(),
            })
        } else {
            self.current_question = current + 1;
            debug!(answered = current, option, "answer recorded");
            Ok(Transition::Advanced {
                answered: current,
                next: current + 1,
            })
        }
    }

    /// Display a question, leaving results if they are shown.
    ///
    /// Answers and the recorded score are kept, so a user can review a
    /// finished quiz question by question.
    pub fn go_to_question(
        &mut self,
        document: &QuizDocument,
        index: usize,
    ) -> Result<Transition, TransitionError> {
        if index >= document.len() {
            return Err(TransitionError::QuestionOutOfRange {
                index,
                total: document.len(),
            });
        }

        self.current_question = index;
        self.results_revealed = false;
        debug!(to = index, "moved to question");
        Ok(Transition::Moved { to: index })
    }

    /// Display the previous question.
    pub fn previous(&mut self, document: &QuizDocument) -> Result<Transition, TransitionError> {
        match self.current_question.checked_sub(1) {
            Some(index) => self.go_to_question(document, index),
            None => Err(TransitionError::AtFirstQuestion),
        }
    }

    /// Display the next question.
    pub fn next(&mut self, document: &QuizDocument) -> Result<Transition, TransitionError> {
        let index = self.current_question + 1;
        if index >= document.len() {
            return Err(TransitionError::AtLastQuestion);
        }
        self.go_to_question(document, index)
    }

    /// Return to the first question with no answers and no score.
    pub fn reset(&mut self) -> Transition {
        *self = Self::default();
        debug!("quiz session reset");
        Transition::Reset
    }

    /// Check whether "Previous" is available.
    pub const fn can_go_previous(&self) -> bool {
        self.current_question > 0
    }

    /// Check whether "Next" is available for `document`.
    pub fn can_go_next(&self, document: &QuizDocument) -> bool {
        self.current_question + 1 < document.len()
    }

    /// Bring the session back within the bounds of a reshaped document.
    pub fn renormalize(&mut self, document: &QuizDocument) -> Renormalization {
        let before = self.answers.len();
        self.answers.retain(|&index, &mut option| {
            document
                .question(index)
                .is_some_and(|question| option < question.options.len())
        });

        let mut change = Renormalization {
            dropped_answers: before - self.answers.len(),
            ..Renormalization::default()
        };

        let last = document.last_index().unwrap_or(0);
        if self.current_question > last {
            self.current_question = last;
            change.clamped = true;
        }

        if self.results_revealed {
            let rescored = score(document, &self.answers);
            change.rescored = rescored != self.score;
            self.score = rescored;
        }

        if !change.is_noop() {
            debug!(?change, "session renormalized");
        }
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Question;
    use crate::quiz::Phase;

    fn doc(correct: &[usize]) -> QuizDocument {
        QuizDocument {
            title: "T".to_string(),
            questions: correct
                .iter()
                .map(|&c| Question {
                    prompt: format!("Q{c}"),
                    options: vec!["a".into(), "b".into(), "c".into()],
                    correct_option: c,
                    explanation: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_three_question_scenario() {
        let quiz = doc(&[0, 1, 2]);
        let mut session = QuizSession::new();

        assert_eq!(
            session.select_answer(&quiz, 0),
            Ok(Transition::Advanced { answered: 0, next: 1 })
        );
        assert_eq!(
            session.select_answer(&quiz, 0),
            Ok(Transition::Advanced { answered: 1, next: 2 })
        );
        assert_eq!(
            session.select_answer(&quiz, 2),
            Ok(Transition::Completed { score: 2, total: 3 })
        );
        assert_eq!(session.phase(), Phase::Results);
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn test_select_in_results_rejected() {
        let quiz = doc(&[0]);
        let mut session = QuizSession::new();
        session.select_answer(&quiz, 1).unwrap();
        let before = session.clone();
        assert_eq!(session.select_answer(&quiz, 0), Err(TransitionError::ResultsShown));
        assert_eq!(session, before);
    }

    #[test]
    fn test_select_option_out_of_range() {
        let quiz = doc(&[0, 0]);
        let mut session = QuizSession::new();
        assert_eq!(
            session.select_answer(&quiz, 3),
            Err(TransitionError::OptionOutOfRange { question: 0, option: 3, options: 3 })
        );
        assert!(session.is_pristine());
    }

    #[test]
    fn test_select_after_document_shrank() {
        let long = doc(&[0, 0, 0]);
        let short = doc(&[0]);
        let mut session = QuizSession::new();
        session.select_answer(&long, 0).unwrap();
        session.select_answer(&long, 0).unwrap();

        let before = session.clone();
        assert_eq!(
            session.select_answer(&short, 0),
            Err(TransitionError::QuestionOutOfRange { index: 2, total: 1 })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_unanswered_counts_incorrect() {
        let quiz = doc(&[0, 0, 0]);
        let mut session = QuizSession::new();
        session.go_to_question(&quiz, 2).unwrap();
        assert_eq!(
            session.select_answer(&quiz, 0),
            Ok(Transition::Completed { score: 1, total: 3 })
        );
    }

    #[test]
    fn test_reanswer_overwrites() {
        let quiz = doc(&[1, 1]);
        let mut session = QuizSession::new();
        session.select_answer(&quiz, 0).unwrap();
        session.go_to_question(&quiz, 0).unwrap();
        session.select_answer(&quiz, 1).unwrap();
        assert_eq!(session.answer(0), Some(1));
        assert_eq!(session.current_question(), 1);
    }

    #[test]
    fn test_go_to_question_from_results_keeps_answers_and_score() {
        let quiz = doc(&[0, 1, 2]);
        let mut session = QuizSession::new();
        for option in [0, 0, 2] {
            session.select_answer(&quiz, option).unwrap();
        }
        let answers = session.answers().clone();

        assert_eq!(session.go_to_question(&quiz, 1), Ok(Transition::Moved { to: 1 }));
        assert_eq!(session.phase(), Phase::Answering { question: 1 });
        assert_eq!(session.answers(), &answers);
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn test_go_to_question_out_of_range() {
        let quiz = doc(&[0, 0]);
        let mut session = QuizSession::new();
        session.select_answer(&quiz, 1).unwrap();
        let before = session.clone();
        assert_eq!(
            session.go_to_question(&quiz, 2),
            Err(TransitionError::QuestionOutOfRange { index: 2, total: 2 })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_previous_next_disabled_at_edges() {
        let quiz = doc(&[0, 0]);
        let mut session = QuizSession::new();
        assert!(!session.can_go_previous());
        assert_eq!(session.previous(&quiz), Err(TransitionError::AtFirstQuestion));

        assert_eq!(session.next(&quiz), Ok(Transition::Moved { to: 1 }));
        assert!(!session.can_go_next(&quiz));
        assert_eq!(session.next(&quiz), Err(TransitionError::AtLastQuestion));
        assert_eq!(session.previous(&quiz), Ok(Transition::Moved { to: 0 }));
    }

    #[test]
    fn test_reset_from_any_state() {
        let quiz = doc(&[0, 1]);
        let mut session = QuizSession::new();
        session.select_answer(&quiz, 0).unwrap();
        session.select_answer(&quiz, 1).unwrap();
        assert_eq!(session.apply(&quiz, QuizAction::Reset), Ok(Transition::Reset));
        assert!(session.is_pristine());
    }

    #[test]
    fn test_renormalize_drops_and_clamps() {
        let long = doc(&[0, 1, 2]);
        let mut session = QuizSession::new();
        for option in [0, 1, 2] {
            session.select_answer(&long, option).unwrap();
        }
        session.go_to_question(&long, 2).unwrap();

        let mut short = doc(&[0, 1]);
        short.questions[1].options.truncate(1);
        let change = session.renormalize(&short);

        assert_eq!(change.dropped_answers, 2);
        assert!(change.clamped);
        assert_eq!(session.current_question(), 1);
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn test_renormalize_rescores_revealed_results() {
        let quiz = doc(&[0, 0]);
        let mut session = QuizSession::new();
        session.select_answer(&quiz, 0).unwrap();
        session.select_answer(&quiz, 0).unwrap();
        assert_eq!(session.score(), 2);

        let shorter = doc(&[0]);
        let change = session.renormalize(&shorter);
        assert!(change.rescored);
        assert_eq!(session.score(), 1);
        assert!(session.renormalize(&shorter).is_noop());
    }
}
