//! Quiz document model.
//!
//! The serialized form is the only persisted artifact of a quiz:
//!
//! ```json
//! {
//!   "title": "Ownership",
//!   "questions": [
//!     {
//!       "question": "Who frees a Box?",
//!       "options": ["The owner", "The GC"],
//!       "correct": 0,
//!       "explanation": "Drop runs when the owner goes out of scope."
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// A parsed quiz.
///
/// Documents are immutable once parsed; every successful parse produces a
/// new document rather than patching the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDocument {
    /// Quiz title.
    pub title: String,
    /// Questions in presentation order.
    pub questions: Vec<Question>,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    #[serde(rename = "question")]
    pub prompt: String,
    /// Answer options, at least two.
    pub options: Vec<String>,
    /// Index of the correct option.
    #[serde(rename = "correct")]
    pub correct_option: usize,
    /// Why the correct option is correct.
    pub explanation: String,
}

impl Question {
    /// Check whether `option` is the correct answer.
    pub const fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }

    /// Get an option's text.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}

/// The parts of a document that session state is indexed by.
///
/// Two documents with the same shape accept the same answers, so a session
/// only needs renormalizing when the shape changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentShape {
    option_counts: Vec<usize>,
}

impl DocumentShape {
    /// Number of questions.
    pub fn question_count(&self) -> usize {
        self.option_counts.len()
    }

    /// Number of options of a question.
    pub fn option_count(&self, question: usize) -> Option<usize> {
        self.option_counts.get(question).copied()
    }
}

impl QuizDocument {
    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check if the quiz has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get a question by index.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Index of the last question, if any.
    pub fn last_index(&self) -> Option<usize> {
        self.questions.len().checked_sub(1)
    }

    /// Get the document's shape.
    pub fn shape(&self) -> DocumentShape {
        DocumentShape {
            option_counts: self.questions.iter().map(|q| q.options.len()).collect(),
        }
    }

    /// Serialize back to the wire format.
    pub fn to_json(&self) -> String {
        // Serializing plain strings and integers cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: usize, correct: usize) -> Question {
        Question {
            prompt: "Q".to_string(),
            options: (0..options).map(|i| format!("opt {i}")).collect(),
            correct_option: correct,
            explanation: String::new(),
        }
    }

    #[test]
    fn test_wire_field_names() {
        let doc = QuizDocument {
            title: "T".to_string(),
            questions: vec![question(2, 1)],
        };
        let json = doc.to_json();
        assert!(json.contains("\"question\":\"Q\""));
        assert!(json.contains("\"correct\":1"));
        assert!(!json.contains("prompt"));
    }

    #[test]
    fn test_shape_tracks_option_counts() {
        let a = QuizDocument {
            title: "A".to_string(),
            questions: vec![question(2, 0), question(4, 3)],
        };
        let mut b = a.clone();
        b.title = "B".to_string();
        b.questions[0].prompt = "changed".to_string();
        assert_eq!(a.shape(), b.shape());

        b.questions[1].options.pop();
        assert_ne!(a.shape(), b.shape());
        assert_eq!(b.shape().option_count(1), Some(3));
        assert_eq!(b.shape().question_count(), 2);
    }

    #[test]
    fn test_last_index() {
        let doc = QuizDocument {
            title: String::new(),
            questions: vec![question(2, 0); 3],
        };
        assert_eq!(doc.last_index(), Some(2));
        assert!(doc.question(0).unwrap().is_correct(0));
        assert_eq!(doc.question(0).unwrap().option(1), Some("opt 1"));
    }
}
