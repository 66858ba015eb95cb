//! Document parser: raw buffer to validated [`QuizDocument`].
//!
//! Parsing is pure. It runs on every change of the raw buffer, including
//! the many half-written buffers seen while streaming, so every failure is
//! reported as a [`ParseError`] value and nothing panics.

use super::model::QuizDocument;
use crate::error::ParseError;
use serde_json::error::Category;
use std::str::FromStr;
use tracing::trace;

/// Minimum number of options a question must offer.
pub const MIN_OPTIONS: usize = 2;

/// Parse and validate a raw buffer.
///
/// # Example
///
/// ```
/// use quizflow::document::parse;
///
/// let raw = r#"{"title":"T","questions":[
///     {"question":"Q","options":["a","b"],"correct":1,"explanation":"E"}]}"#;
/// let quiz = parse(raw).unwrap();
/// assert_eq!(quiz.questions[0].correct_option, 1);
///
/// assert!(parse("not json").is_err());
/// ```
pub fn parse(raw: &str) -> Result<QuizDocument, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let document: QuizDocument = serde_json::from_str(raw).map_err(|err| {
        let err = from_json_error(&err);
        trace!(%err, "quiz parse failed");
        err
    })?;
    validate(&document)?;
    Ok(document)
}

/// Check the invariants serde cannot express.
pub fn validate(document: &QuizDocument) -> Result<(), ParseError> {
    if document.questions.is_empty() {
        return Err(ParseError::NoQuestions);
    }

    for (index, question) in document.questions.iter().enumerate() {
        let count = question.options.len();
        if count < MIN_OPTIONS {
            return Err(ParseError::TooFewOptions { question: index, count });
        }
        if question.correct_option >= count {
            return Err(ParseError::CorrectOutOfRange {
                question: index,
                correct: question.correct_option,
                options: count,
            });
        }
    }

    Ok(())
}

/// Map a decoder error to the parse taxonomy.
fn from_json_error(err: &serde_json::Error) -> ParseError {
    let line = err.line();
    let column = err.column();
    match err.classify() {
        Category::Eof => ParseError::Incomplete { line, column },
        Category::Data => ParseError::Structure {
            line,
            column,
            reason: strip_position(err),
        },
        Category::Syntax | Category::Io => ParseError::Syntax {
            line,
            column,
            reason: strip_position(err),
        },
    }
}

/// The decoder's message without its trailing position.
fn strip_position(err: &serde_json::Error) -> String {
    let text = err.to_string();
    match text.rfind(" at line ") {
        Some(pos) => text[..pos].to_string(),
        None => text,
    }
}

impl FromStr for QuizDocument {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse(raw)
    }
}
