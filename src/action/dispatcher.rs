//! Action identifiers, their effects and enablement rules.

use super::outbox::OutboundMessage;
use crate::history::{Direction, ViewMode};
use crate::quiz::QuizSession;
use bitflags::bitflags;
use std::sync::Arc;

/// A command offered in the artifact's action bar or toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    /// Toggle the diff view.
    ViewChanges,
    /// View the previous version.
    PreviousVersion,
    /// View the next version.
    NextVersion,
    /// Copy the raw content.
    CopyContent,
    /// Reset the quiz session.
    ResetQuiz,
    /// Ask for more questions.
    AddQuestions,
    /// Ask for a new quiz on the same topic.
    Regenerate,
}

bitflags! {
    /// A set of actions, used to report which ones are enabled.
    ///
    /// # Example
    /// ```
    /// use quizflow::action::ActionSet;
    /// let nav = ActionSet::PREVIOUS_VERSION | ActionSet::NEXT_VERSION;
    /// assert!(nav.contains(ActionSet::NEXT_VERSION));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ActionSet: u8 {
        /// [`ActionId::ViewChanges`]
        const VIEW_CHANGES = 0b0000_0001;
        /// [`ActionId::PreviousVersion`]
        const PREVIOUS_VERSION = 0b0000_0010;
        /// [`ActionId::NextVersion`]
        const NEXT_VERSION = 0b0000_0100;
        /// [`ActionId::CopyContent`]
        const COPY_CONTENT = 0b0000_1000;
        /// [`ActionId::ResetQuiz`]
        const RESET_QUIZ = 0b0001_0000;
        /// [`ActionId::AddQuestions`]
        const ADD_QUESTIONS = 0b0010_0000;
        /// [`ActionId::Regenerate`]
        const REGENERATE = 0b0100_0000;
    }
}

/// Where an action is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The artifact's action bar.
    ActionBar,
    /// The floating toolbar.
    Toolbar,
}

/// What dispatching an action does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// Switch between edit and diff view.
    ToggleDiff,
    /// Step through versions.
    Step(Direction),
    /// Reset the session state.
    ResetSession,
    /// Export the raw content verbatim.
    Export,
    /// Send an instruction to the generation collaborator.
    Request,
}

/// Inputs that decide whether an action is enabled.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// Index of the viewed version.
    pub current_version_index: usize,
    /// Whether the viewed version is the newest one.
    pub is_current_version: bool,
    /// The quiz session, for kinds that have one.
    pub session: Option<&'a QuizSession>,
}

impl ActionId {
    /// Every action, in display order.
    pub const ALL: [Self; 7] = [
        Self::ViewChanges,
        Self::PreviousVersion,
        Self::NextVersion,
        Self::CopyContent,
        Self::ResetQuiz,
        Self::AddQuestions,
        Self::Regenerate,
    ];

    /// The action's flag.
    pub const fn flag(self) -> ActionSet {
        match self {
            Self::ViewChanges => ActionSet::VIEW_CHANGES,
            Self::PreviousVersion => ActionSet::PREVIOUS_VERSION,
            Self::NextVersion => ActionSet::NEXT_VERSION,
            Self::CopyContent => ActionSet::COPY_CONTENT,
            Self::ResetQuiz => ActionSet::RESET_QUIZ,
            Self::AddQuestions => ActionSet::ADD_QUESTIONS,
            Self::Regenerate => ActionSet::REGENERATE,
        }
    }

    /// What the action does.
    pub const fn effect(self) -> ActionEffect {
        match self {
            Self::ViewChanges => ActionEffect::ToggleDiff,
            Self::PreviousVersion => ActionEffect::Step(Direction::Prev),
            Self::NextVersion => ActionEffect::Step(Direction::Next),
            Self::CopyContent => ActionEffect::Export,
            Self::ResetQuiz => ActionEffect::ResetSession,
            Self::AddQuestions | Self::Regenerate => ActionEffect::Request,
        }
    }

    /// Where the action is offered.
    pub const fn placement(self) -> Placement {
        match self {
            Self::AddQuestions | Self::Regenerate => Placement::Toolbar,
            _ => Placement::ActionBar,
        }
    }

    /// Check whether the action is enabled.
    pub const fn is_enabled(self, ctx: &ActionContext<'_>) -> bool {
        match self {
            Self::ViewChanges | Self::PreviousVersion => ctx.current_version_index != 0,
            Self::NextVersion => !ctx.is_current_version,
            Self::ResetQuiz => ctx.session.is_some(),
            Self::CopyContent | Self::AddQuestions | Self::Regenerate => true,
        }
    }
}

/// Enabled subset of `actions` in the given context.
pub fn enabled_actions(actions: &[ActionId], ctx: &ActionContext<'_>) -> ActionSet {
    actions
        .iter()
        .filter(|action| action.is_enabled(ctx))
        .fold(ActionSet::empty(), |set, action| set | action.flag())
}

/// Per-kind presentation of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    /// The action.
    pub id: ActionId,
    /// Tooltip text.
    pub description: &'static str,
    /// Instruction sent for [`ActionEffect::Request`] actions.
    pub instruction: Option<&'static str>,
    /// Confirmation shown after a successful dispatch.
    pub notice: Option<&'static str>,
}

impl ActionSpec {
    /// Spec with only a description.
    pub const fn new(id: ActionId, description: &'static str) -> Self {
        Self {
            id,
            description,
            instruction: None,
            notice: None,
        }
    }

    /// Attach the outbound instruction.
    pub const fn with_instruction(mut self, instruction: &'static str) -> Self {
        self.instruction = Some(instruction);
        self
    }

    /// Attach the confirmation notice.
    pub const fn with_notice(mut self, notice: &'static str) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The view mode changed.
    ModeChanged(ViewMode),
    /// The viewed version changed.
    VersionChanged(usize),
    /// The session returned to its defaults.
    SessionReset,
    /// Raw content to place on the clipboard.
    Exported(Arc<str>),
    /// The instruction handed to the outbox.
    Requested {
        /// The message offered to the collaborator.
        message: OutboundMessage,
        /// Whether the outbox accepted it.
        delivered: bool,
    },
}

/// A successful dispatch with its user-facing confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// What the action did.
    pub outcome: ActionOutcome,
    /// Notice to show the user, if the kind defines one for the action.
    pub notice: Option<&'static str>,
}
