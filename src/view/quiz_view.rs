//! Quiz view model.

use super::text::{option_label, truncate_to_width};
use crate::artifact::QuizArtifact;
use crate::document::{self, QuizDocument};
use crate::error::ParseError;
use crate::history::{ContentDiff, ViewMode};
use crate::quiz::{self, AnswerOutcome, Phase, QuizSession};
use serde::Deserialize;

/// View model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Maximum display width of question navigation labels.
    pub nav_label_width: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { nav_label_width: 24 }
    }
}

/// What the quiz renderer should draw.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizView {
    /// Content is still arriving and nothing is displayable yet.
    Loading,
    /// Content failed to parse and no earlier document exists.
    Error {
        /// Parse error description.
        message: String,
    },
    /// Diff of the viewed version against its predecessor.
    Diff(ContentDiff),
    /// An older version, read-only.
    Version {
        /// Index of the viewed version.
        index: usize,
        /// The version parsed, or why it does not parse.
        document: Result<QuizDocument, ParseError>,
    },
    /// The current question.
    Question(QuestionView),
    /// The results screen.
    Results(ResultsView),
}

/// An answer option of the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    /// Option label, `A` for the first.
    pub label: String,
    /// Option text.
    pub text: String,
    /// Whether the user previously chose this option.
    pub selected: bool,
}

/// A question navigation button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// 1-based question number.
    pub number: usize,
    /// Prompt truncated to the label width.
    pub label: String,
    /// Whether this is the displayed question.
    pub current: bool,
    /// Whether the question has an answer.
    pub answered: bool,
}

/// The answering screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// Quiz title.
    pub title: String,
    /// 1-based question number.
    pub number: usize,
    /// Number of questions.
    pub total: usize,
    /// Progress through the quiz, in percent.
    pub progress: usize,
    /// Question prompt.
    pub prompt: String,
    /// Answer options.
    pub options: Vec<OptionView>,
    /// Navigation buttons, one per question.
    pub nav: Vec<NavItem>,
    /// Whether "Previous" is enabled.
    pub can_previous: bool,
    /// Whether "Next" is enabled.
    pub can_next: bool,
    /// Inline note when the latest content failed to parse.
    pub notice: Option<String>,
}

/// Marking of an option on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// The correct option.
    Correct,
    /// The user's wrong choice.
    WrongChoice,
    /// Neither.
    Plain,
}

/// Review of one question on the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewView {
    /// 1-based question number.
    pub number: usize,
    /// Question prompt.
    pub prompt: String,
    /// How the question was answered.
    pub outcome: AnswerOutcome,
    /// Options with their marking.
    pub options: Vec<(String, OptionMark)>,
    /// Explanation of the correct answer.
    pub explanation: String,
}

/// The results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    /// Quiz title.
    pub title: String,
    /// Correct answers.
    pub score: usize,
    /// Number of questions.
    pub total: usize,
    /// Rounded percentage.
    pub percent: usize,
    /// Per-question review.
    pub reviews: Vec<ReviewView>,
    /// Inline note when the latest content failed to parse.
    pub notice: Option<String>,
}

impl QuizView {
    /// Project the artifact's state into a view.
    pub fn build(artifact: &QuizArtifact, config: &ViewConfig) -> Self {
        let history = artifact.history();

        if history.mode() == ViewMode::Diff {
            if let Some(diff) = history.diff_view() {
                return Self::Diff(diff);
            }
        }

        if !history.is_at_latest() {
            return Self::Version {
                index: history.current_index(),
                document: document::parse(artifact.displayed_content()),
            };
        }

        let pending = |err: &ParseError| err.is_incomplete() && artifact.is_streaming();
        let notice = artifact
            .parse_error()
            .filter(|err| !pending(err))
            .map(ToString::to_string);

        let Some(document) = artifact.document() else {
            return notice.map_or(Self::Loading, |message| Self::Error { message });
        };

        let session = artifact.state();
        match session.phase() {
            Phase::Results => Self::Results(results_view(document, session, notice)),
            Phase::Answering { question } => {
                Self::Question(question_view(document, session, question, notice, config))
            }
        }
    }

    /// Check whether the view is interactive.
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Question(_) | Self::Results(_))
    }
}

fn question_view(
    document: &QuizDocument,
    session: &QuizSession,
    current: usize,
    notice: Option<String>,
    config: &ViewConfig,
) -> QuestionView {
    let total = document.len();
    let (prompt, options) = document
        .question(current)
        .map(|question| {
            let chosen = session.answer(current);
            let options = question
                .options
                .iter()
                .enumerate()
                .map(|(index, text)| OptionView {
                    label: option_label(index),
                    text: text.clone(),
                    selected: chosen == Some(index),
                })
                .collect();
            (question.prompt.clone(), options)
        })
        .unwrap_or_default();

    let nav = document
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| NavItem {
            number: index + 1,
            label: truncate_to_width(&question.prompt, config.nav_label_width).into_owned(),
            current: index == current,
            answered: session.answer(index).is_some(),
        })
        .collect();

    QuestionView {
        title: document.title.clone(),
        number: current + 1,
        total,
        progress: quiz::percent(current + 1, total),
        prompt,
        options,
        nav,
        can_previous: session.can_go_previous(),
        can_next: session.can_go_next(document),
        notice,
    }
}

fn results_view(
    document: &QuizDocument,
    session: &QuizSession,
    notice: Option<String>,
) -> ResultsView {
    let summary = quiz::results(document, session);
    let reviews = summary
        .reviews
        .iter()
        .zip(&document.questions)
        .map(|(review, question)| ReviewView {
            number: review.index + 1,
            prompt: question.prompt.clone(),
            outcome: review.outcome,
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(index, text)| {
                    let mark = if index == review.correct {
                        OptionMark::Correct
                    } else if review.chosen == Some(index) {
                        OptionMark::WrongChoice
                    } else {
                        OptionMark::Plain
                    };
                    (text.clone(), mark)
                })
                .collect(),
            explanation: question.explanation.clone(),
        })
        .collect();

    ResultsView {
        title: document.title.clone(),
        score: summary.score,
        total: summary.total,
        percent: summary.percent,
        reviews,
        notice,
    }
}
