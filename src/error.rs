//! Error types for artifact operations.
//!
//! No error in this crate is fatal to the artifact: each one describes a
//! rejected input or transition, and the artifact stays interactive
//! afterwards.
//!
//! # Error Categories
//!
//! | Category | Type | Recovery |
//! |----------|------|----------|
//! | Document | [`ParseError`] | Last valid document stays on display |
//! | Progression | [`TransitionError`] | Rejected, session unchanged |
//! | Versions | [`NavigationError`] | Rejected, cursor unchanged |
//! | Toolbar | [`DispatchError`] | Rejected, nothing dispatched |

use crate::action::ActionId;
use crate::history::Direction;
use thiserror::Error;

/// Result type for artifact operations.
pub type Result<T, E = DispatchError> = std::result::Result<T, E>;

/// Reasons a raw buffer could not be turned into a document.
///
/// Streaming produces many intermediate buffers that end mid-document;
/// those report [`ParseError::Incomplete`] and are expected, not faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The raw buffer is empty or whitespace.
    #[error("quiz content is empty")]
    Empty,

    /// The buffer ends before the document is complete.
    #[error("quiz content ends early at line {line}, column {column}")]
    Incomplete {
        /// 1-based line of the end of input.
        line: usize,
        /// 1-based column of the end of input.
        column: usize,
    },

    /// The buffer is not valid JSON.
    #[error("invalid quiz format at line {line}, column {column}: {reason}")]
    Syntax {
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// Description from the decoder.
        reason: String,
    },

    /// The JSON does not have the quiz shape (missing field, wrong type).
    #[error("invalid quiz structure at line {line}, column {column}: {reason}")]
    Structure {
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// Description from the decoder.
        reason: String,
    },

    /// The quiz contains no questions.
    #[error("quiz has no questions")]
    NoQuestions,

    /// A question offers fewer than two options.
    #[error("question {question} has {count} option(s), at least 2 are required")]
    TooFewOptions {
        /// 0-based question index.
        question: usize,
        /// Number of options found.
        count: usize,
    },

    /// A question's correct answer does not index one of its options.
    #[error("question {question} marks option {correct} correct but has {options} options")]
    CorrectOutOfRange {
        /// 0-based question index.
        question: usize,
        /// The declared correct option.
        correct: usize,
        /// Number of options.
        options: usize,
    },
}

impl ParseError {
    /// Check whether the buffer might still become valid with more input.
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Self::Empty | Self::Incomplete { .. })
    }
}

/// A quiz transition that the current document or session does not allow.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// No document has been parsed yet.
    #[error("no quiz is loaded")]
    NoDocument,

    /// Answers can only be recorded while answering.
    #[error("results are shown; navigate to a question before answering")]
    ResultsShown,

    /// The question index is outside the current document.
    #[error("question {index} is out of range (quiz has {total} questions)")]
    QuestionOutOfRange {
        /// Requested question index.
        index: usize,
        /// Number of questions in the current document.
        total: usize,
    },

    /// The option index is outside the current question.
    #[error("option {option} is out of range for question {question} ({options} options)")]
    OptionOutOfRange {
        /// Current question index.
        question: usize,
        /// Requested option index.
        option: usize,
        /// Number of options of the question.
        options: usize,
    },

    /// "Previous" at the first question.
    #[error("already at the first question")]
    AtFirstQuestion,

    /// "Next" at the last question.
    #[error("already at the last question")]
    AtLastQuestion,

    /// The artifact kind has no quiz session.
    #[error("this artifact kind has no interactive session")]
    Unsupported,
}

/// Version navigation that is disabled or out of range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// The history holds no versions yet.
    #[error("no versions recorded")]
    Empty,

    /// Stepping in this direction is disabled at the current cursor.
    #[error("cannot step to the {0} version")]
    Disabled(Direction),

    /// The diff view needs a predecessor version.
    #[error("no earlier version to compare against")]
    NoPredecessor,

    /// A requested version index does not exist.
    #[error("version {index} does not exist ({len} versions)")]
    OutOfRange {
        /// Requested version index.
        index: usize,
        /// Number of recorded versions.
        len: usize,
    },
}

/// A toolbar or action-menu command that could not run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The action is disabled in the current context.
    #[error("action {0:?} is disabled")]
    Disabled(ActionId),

    /// The action is not offered by this artifact kind.
    #[error("action {action:?} is not available for {kind} artifacts")]
    Unsupported {
        /// The artifact kind identifier.
        kind: &'static str,
        /// The requested action.
        action: ActionId,
    },

    /// A quiz transition was rejected.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// A version navigation was rejected.
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_classification() {
        assert!(ParseError::Empty.is_incomplete());
        assert!(ParseError::Incomplete { line: 1, column: 4 }.is_incomplete());
        assert!(!ParseError::NoQuestions.is_incomplete());
    }

    #[test]
    fn test_display_includes_bounds() {
        let err = TransitionError::QuestionOutOfRange { index: 7, total: 3 };
        let text = err.to_string();
        assert!(text.contains('7'));
        assert!(text.contains('3'));
    }

    #[test]
    fn test_dispatch_error_wraps_transition() {
        let err: DispatchError = TransitionError::ResultsShown.into();
        assert_eq!(err, DispatchError::Transition(TransitionError::ResultsShown));
    }
}
