//! Quiz session state.
//!
//! Session state is transient progress through the current document. It is
//! never persisted on its own and is only ever mutated by the transitions
//! in [`super::machine`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a session is in the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The user is answering a question.
    Answering {
        /// Index of the displayed question.
        question: usize,
    },
    /// The score is shown.
    Results,
}

/// Progress of one user through one quiz document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuizSession {
    /// Index of the displayed question.
    pub(super) current_question: usize,
    /// Chosen option per answered question.
    pub(super) answers: BTreeMap<usize, usize>,
    /// Whether the results are shown.
    pub(super) results_revealed: bool,
    /// Score computed when the last question was answered.
    pub(super) score: usize,
}

impl QuizSession {
    /// Create a session at the first question with no answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the displayed question.
    pub const fn current_question(&self) -> usize {
        self.current_question
    }

    /// Chosen options keyed by question index.
    pub const fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    /// The option chosen for a question, if answered.
    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    /// Whether the results are shown.
    pub const fn results_revealed(&self) -> bool {
        self.results_revealed
    }

    /// The recorded score.
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Current phase.
    pub const fn phase(&self) -> Phase {
        if self.results_revealed {
            Phase::Results
        } else {
            Phase::Answering {
                question: self.current_question,
            }
        }
    }

    /// Check whether the session is in its initial state.
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}
