//! Artifact kinds: one state-machine shape shared by every document kind.
//!
//! Each kind implements [`ArtifactKind`] (`parse`, `initial_state`,
//! `apply`) and registers a [`KindDescriptor`] in the dispatch table keyed
//! by [`KindId`].

use crate::action::{ActionId, ActionSpec, Placement};
use crate::document::{self, QuizDocument};
use crate::error::{ParseError, TransitionError};
use crate::quiz::{QuizAction, QuizSession, Transition};
use std::convert::Infallible;
use std::fmt::Debug;
use std::str::FromStr;

/// Contract every artifact kind implements.
///
/// The artifact owns the raw content and calls into the kind to interpret
/// it and to drive the kind's session state.
pub trait ArtifactKind: 'static {
    /// Structured document parsed from raw content.
    type Document: Debug + PartialEq + Send + Sync + 'static;
    /// Transient session state paired with the current document.
    type State: Debug + Clone + Default + Send + 'static;
    /// User interactions with the document.
    type Action: Debug + Copy + Send + 'static;
    /// Effect of an accepted interaction.
    type Outcome: Debug + Clone + PartialEq + Send + 'static;

    /// Kind identifier.
    const ID: KindId;

    /// Parse raw content into a document.
    fn parse(raw: &str) -> Result<Self::Document, ParseError>;

    /// Session state for a freshly initialized artifact.
    fn initial_state() -> Self::State {
        Self::State::default()
    }

    /// Apply an interaction against the current document.
    fn apply(
        document: Option<&Self::Document>,
        state: &mut Self::State,
        action: Self::Action,
    ) -> Result<Self::Outcome, TransitionError>;

    /// Return the session to its initial state.
    fn reset_session(state: &mut Self::State) {
        *state = Self::initial_state();
    }

    /// Re-pair the session with a newly parsed document.
    fn on_document_changed(
        _previous: Option<&Self::Document>,
        _current: &Self::Document,
        _state: &mut Self::State,
    ) {
    }

    /// The quiz session, for kinds that have one.
    fn quiz_session(_state: &Self::State) -> Option<&QuizSession> {
        None
    }

    /// Descriptor from the dispatch table.
    fn descriptor() -> &'static KindDescriptor {
        Self::ID.descriptor()
    }
}

/// Identifier of an artifact kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindId {
    /// Interactive quiz.
    Quiz,
    /// Plain text document.
    Text,
}

impl KindId {
    /// Every registered kind.
    pub const ALL: [Self; 2] = [Self::Quiz, Self::Text];

    /// Wire identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Text => "text",
        }
    }

    /// Look up the kind's descriptor.
    pub fn descriptor(self) -> &'static KindDescriptor {
        match self {
            Self::Quiz => &QUIZ_DESCRIPTOR,
            Self::Text => &TEXT_DESCRIPTOR,
        }
    }
}

impl FromStr for KindId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown artifact kind: {s}"))
    }
}

/// Static description of a kind: its text and offered actions.
#[derive(Debug)]
pub struct KindDescriptor {
    /// Kind identifier.
    pub id: KindId,
    /// One-line description.
    pub description: &'static str,
    /// Actions offered, in display order.
    pub actions: &'static [ActionSpec],
}

impl KindDescriptor {
    /// Presentation of an action, if the kind offers it.
    pub fn action(&self, id: ActionId) -> Option<&ActionSpec> {
        self.actions.iter().find(|spec| spec.id == id)
    }

    /// Offered actions shown at `placement`, in display order.
    pub fn actions_at(&self, placement: Placement) -> impl Iterator<Item = &ActionSpec> + '_ {
        self.actions
            .iter()
            .filter(move |spec| spec.id.placement() == placement)
    }

    /// Identifiers of the offered actions.
    pub fn action_ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.actions.iter().map(|spec| spec.id)
    }
}

/// Instruction sent by "Add more questions".
pub const ADD_QUESTIONS_INSTRUCTION: &str =
    "Please add 3 more questions to this quiz with varying difficulty levels.";

/// Instruction sent by "Regenerate quiz".
pub const REGENERATE_INSTRUCTION: &str =
    "Please regenerate this quiz with different questions on the same topic.";

static QUIZ_DESCRIPTOR: KindDescriptor = KindDescriptor {
    id: KindId::Quiz,
    description: "Interactive quiz generator for learning and assessment.",
    actions: &[
        ActionSpec::new(ActionId::ViewChanges, "View changes"),
        ActionSpec::new(ActionId::PreviousVersion, "View Previous version"),
        ActionSpec::new(ActionId::NextVersion, "View Next version"),
        ActionSpec::new(ActionId::CopyContent, "Copy quiz JSON")
            .with_notice("Quiz JSON copied to clipboard!"),
        ActionSpec::new(ActionId::ResetQuiz, "Reset quiz").with_notice("Quiz reset!"),
        ActionSpec::new(ActionId::AddQuestions, "Add more questions")
            .with_instruction(ADD_QUESTIONS_INSTRUCTION),
        ActionSpec::new(ActionId::Regenerate, "Regenerate quiz")
            .with_instruction(REGENERATE_INSTRUCTION),
    ],
};

static TEXT_DESCRIPTOR: KindDescriptor = KindDescriptor {
    id: KindId::Text,
    description: "Text document with version history.",
    actions: &[
        ActionSpec::new(ActionId::ViewChanges, "View changes"),
        ActionSpec::new(ActionId::PreviousVersion, "View Previous version"),
        ActionSpec::new(ActionId::NextVersion, "View Next version"),
        ActionSpec::new(ActionId::CopyContent, "Copy to clipboard")
            .with_notice("Copied to clipboard!"),
    ],
};

/// The quiz kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizKind;

impl ArtifactKind for QuizKind {
    type Document = QuizDocument;
    type State = QuizSession;
    type Action = QuizAction;
    type Outcome = Transition;

    const ID: KindId = KindId::Quiz;

    fn parse(raw: &str) -> Result<QuizDocument, ParseError> {
        document::parse(raw)
    }

    fn apply(
        document: Option<&QuizDocument>,
        state: &mut QuizSession,
        action: QuizAction,
    ) -> Result<Transition, TransitionError> {
        match (document, action) {
            // Reset needs no document
            (_, QuizAction::Reset) => Ok(state.reset()),
            (Some(document), action) => state.apply(document, action),
            (None, _) => Err(TransitionError::NoDocument),
        }
    }

    fn reset_session(state: &mut QuizSession) {
        state.reset();
    }

    fn on_document_changed(
        previous: Option<&QuizDocument>,
        current: &QuizDocument,
        state: &mut QuizSession,
    ) {
        let reshaped = previous.map_or(true, |previous| previous.shape() != current.shape());
        if reshaped {
            state.renormalize(current);
        }
    }

    fn quiz_session(state: &QuizSession) -> Option<&QuizSession> {
        Some(state)
    }
}

/// The plain text kind: the raw content is the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextKind;

impl ArtifactKind for TextKind {
    type Document = String;
    type State = ();
    type Action = Infallible;
    type Outcome = ();

    const ID: KindId = KindId::Text;

    fn parse(raw: &str) -> Result<String, ParseError> {
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(raw.to_string())
    }

    fn apply(
        _document: Option<&String>,
        _state: &mut (),
        action: Infallible,
    ) -> Result<(), TransitionError> {
        match action {}
    }
}
