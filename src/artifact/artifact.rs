//! Artifact: single owner of raw content, document, session and versions.
//!
//! The artifact is an explicit reducer. [`Artifact::handle`] applies one
//! [`ArtifactEvent`] to completion and reports its [`Effect`]; nothing else
//! mutates artifact state. This keeps the whole state machine testable
//! without any rendering layer.

use super::kind::{ArtifactKind, KindDescriptor, KindId, QuizKind, TextKind};
use super::messages::{ArtifactEvent, Effect, EventResult, VersionChange};
use crate::action::{
    enabled_actions, ActionContext, ActionEffect, ActionId, ActionOutcome, ActionSet, Dispatched,
    OutboundMessage, Outbox,
};
use crate::document::{DocumentSlot, RefreshOutcome};
use crate::error::{DispatchError, ParseError};
use crate::history::{VersionHistory, VersionStore};
use crate::stream::{AppendOutcome, StreamAccumulator, StreamConfig, StreamPart, StreamStatus};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Configuration for an artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Stream accumulator settings.
    pub stream: StreamConfig,
}

impl ArtifactConfig {
    /// Load a configuration from JSON; missing fields take defaults.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// A quiz artifact.
pub type QuizArtifact = Artifact<QuizKind>;

/// A plain text artifact.
pub type TextArtifact = Artifact<TextKind>;

/// One artifact instance.
#[derive(Debug)]
pub struct Artifact<K: ArtifactKind> {
    /// Live raw content.
    stream: StreamAccumulator,
    /// Last valid document and latest parse error.
    slot: DocumentSlot<K::Document>,
    /// Session state paired with the current document.
    state: K::State,
    /// Committed versions.
    history: VersionHistory,
    /// Outbound request channel.
    outbox: Option<Outbox>,
}

impl<K: ArtifactKind> Default for Artifact<K> {
    fn default() -> Self {
        Self::with_config(ArtifactConfig::default())
    }
}

impl<K: ArtifactKind> Artifact<K> {
    /// Create an empty artifact with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty artifact with custom configuration.
    pub fn with_config(config: ArtifactConfig) -> Self {
        Self {
            stream: StreamAccumulator::with_config(config.stream),
            slot: DocumentSlot::new(),
            state: K::initial_state(),
            history: VersionHistory::new(),
            outbox: None,
        }
    }

    /// Open an artifact from stored versions, viewing the newest one.
    pub fn open<S: VersionStore + ?Sized>(config: ArtifactConfig, store: &S) -> Self {
        let history = VersionHistory::from_store(store);
        let content = history.viewed().map(|c| c.to_string()).unwrap_or_default();
        let mut artifact = Self {
            stream: StreamAccumulator::from_content(config.stream, content),
            history,
            ..Self::with_config(config)
        };
        artifact.refresh();
        artifact
    }

    /// Attach the outbound request channel.
    #[must_use]
    pub fn with_outbox(mut self, outbox: Outbox) -> Self {
        self.outbox = Some(outbox);
        self
    }

    /// Handle one event to completion.
    pub fn handle(&mut self, event: ArtifactEvent<K::Action>) -> EventResult<K::Outcome> {
        match event {
            ArtifactEvent::StreamStarted => Ok(self.begin_stream()),
            ArtifactEvent::Stream(part) => Ok(self.receive(&part)),
            ArtifactEvent::StreamFinished => Ok(self.finish_stream()),
            ArtifactEvent::Interact(action) => self.interact(action),
            ArtifactEvent::Action(id) => self.dispatch(id).map(Effect::Action),
            ArtifactEvent::Version(change) => self.change_version(change),
        }
    }

    /// Start a streaming session. Session state resets for the new revision.
    fn begin_stream(&mut self) -> Effect<K::Outcome> {
        self.stream.begin();
        K::reset_session(&mut self.state);
        self.history.go_to_latest();
        Effect::Started
    }

    /// Consume one inbound stream part.
    fn receive(&mut self, part: &StreamPart) -> Effect<K::Outcome> {
        let Some(text) = part.as_text() else {
            trace!(?part, "stream part ignored");
            return Effect::Ignored;
        };

        let outcome = self.stream.append(text);
        if matches!(outcome, AppendOutcome::Appended { .. }) {
            self.refresh();
        }
        Effect::Appended(outcome)
    }

    /// Seal the live content and commit it as a version.
    fn finish_stream(&mut self) -> Effect<K::Outcome> {
        if !self.stream.finish() || self.stream.is_empty() {
            return Effect::Finished { version: None };
        }
        let version = self.history.append(self.stream.content());
        Effect::Finished {
            version: Some(version),
        }
    }

    /// Re-parse the live content.
    fn refresh(&mut self) {
        match self.slot.refresh(self.stream.content(), K::parse) {
            RefreshOutcome::Replaced { previous } => {
                if let Some(current) = self.slot.document() {
                    K::on_document_changed(previous.as_deref(), current, &mut self.state);
                }
            }
            RefreshOutcome::Retained(err) => {
                if !(err.is_incomplete() && self.stream.is_streaming()) {
                    debug!(%err, "content does not parse, keeping last document");
                }
            }
            RefreshOutcome::Unchanged => {}
        }
    }

    /// Apply a user interaction to the session.
    fn interact(&mut self, action: K::Action) -> EventResult<K::Outcome> {
        let document = self.slot.document().map(Arc::as_ref);
        match K::apply(document, &mut self.state, action) {
            Ok(outcome) => Ok(Effect::Transition(outcome)),
            Err(err) => {
                debug!(%err, ?action, "transition rejected");
                Err(err.into())
            }
        }
    }

    /// Dispatch an action-bar or toolbar command.
    pub fn dispatch(&mut self, id: ActionId) -> Result<Dispatched, DispatchError> {
        let spec = self
            .descriptor()
            .action(id)
            .ok_or(DispatchError::Unsupported {
                kind: K::ID.as_str(),
                action: id,
            })?;
        if !id.is_enabled(&self.action_context()) {
            return Err(DispatchError::Disabled(id));
        }

        let outcome = match id.effect() {
            ActionEffect::ToggleDiff => ActionOutcome::ModeChanged(self.history.toggle_diff()?),
            ActionEffect::Step(direction) => {
                ActionOutcome::VersionChanged(self.history.step(direction)?)
            }
            ActionEffect::ResetSession => {
                K::reset_session(&mut self.state);
                ActionOutcome::SessionReset
            }
            ActionEffect::Export => ActionOutcome::Exported(Arc::from(self.stream.content())),
            ActionEffect::Request => {
                let message = OutboundMessage::user(spec.instruction.unwrap_or(spec.description));
                let delivered = match &self.outbox {
                    Some(outbox) => outbox.send(message.clone()),
                    None => {
                        warn!(?id, "no outbox attached, request dropped");
                        false
                    }
                };
                ActionOutcome::Requested { message, delivered }
            }
        };

        debug!(?id, notice = spec.notice, "action dispatched");
        Ok(Dispatched {
            outcome,
            notice: spec.notice,
        })
    }

    /// Follow a version-change notification.
    fn change_version(&mut self, change: VersionChange) -> EventResult<K::Outcome> {
        match change {
            VersionChange::Toggle => {
                self.history.toggle_diff()?;
            }
            VersionChange::Prev => {
                self.history.step(crate::history::Direction::Prev)?;
            }
            VersionChange::Next => {
                self.history.step(crate::history::Direction::Next)?;
            }
            VersionChange::Latest => self.history.go_to_latest(),
        }
        Ok(Effect::Viewing {
            index: self.history.current_index(),
            mode: self.history.mode(),
        })
    }

    /// Kind identifier.
    pub const fn kind(&self) -> KindId {
        K::ID
    }

    /// The kind's descriptor.
    pub fn descriptor(&self) -> &'static KindDescriptor {
        K::descriptor()
    }

    /// Live raw content.
    pub fn content(&self) -> &str {
        self.stream.content()
    }

    /// Raw content of what is on display: the viewed version, or the live
    /// content when viewing the newest version.
    pub fn displayed_content(&self) -> &str {
        if self.history.is_at_latest() {
            self.stream.content()
        } else {
            self.history.viewed().map_or("", |content| content.as_ref())
        }
    }

    /// The displayed document.
    pub fn document(&self) -> Option<&K::Document> {
        self.slot.document().map(Arc::as_ref)
    }

    /// Shared handle to the displayed document.
    pub fn document_arc(&self) -> Option<Arc<K::Document>> {
        self.slot.document().cloned()
    }

    /// Error from the latest parse.
    pub const fn parse_error(&self) -> Option<&ParseError> {
        self.slot.error()
    }

    /// Session state.
    pub const fn state(&self) -> &K::State {
        &self.state
    }

    /// Version history.
    pub const fn history(&self) -> &VersionHistory {
        &self.history
    }

    /// Whether the artifact is visible to the user.
    pub const fn is_visible(&self) -> bool {
        self.stream.is_visible()
    }

    /// Lifecycle of the live content.
    pub const fn stream_status(&self) -> StreamStatus {
        self.stream.status()
    }

    /// Whether a stream is currently delivering content.
    pub fn is_streaming(&self) -> bool {
        self.stream.is_streaming()
    }

    /// Inputs for action enablement.
    pub fn action_context(&self) -> ActionContext<'_> {
        ActionContext {
            current_version_index: self.history.current_index(),
            is_current_version: self.history.is_at_latest(),
            session: K::quiz_session(&self.state),
        }
    }

    /// Actions of this kind that are currently enabled.
    pub fn enabled_actions(&self) -> ActionSet {
        let ids: Vec<ActionId> = self.descriptor().action_ids().collect();
        enabled_actions(&ids, &self.action_context())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NavigationError, TransitionError};
    use crate::history::{Direction, ViewMode};
    use crate::quiz::{Phase, QuizAction, QuizSession, Transition};

    const QUIZ: &str = r#"{"title":"Borrowing","questions":[
        {"question":"Q1","options":["a","b"],"correct":0,"explanation":"E1"},
        {"question":"Q2","options":["a","b"],"correct":1,"explanation":"E2"},
        {"question":"Q3","options":["a","b"],"correct":0,"explanation":"E3"}]}"#;

    fn stream_in(artifact: &mut QuizArtifact, raw: &str, chunk: usize) {
        artifact.handle(ArtifactEvent::StreamStarted).unwrap();
        let chars: Vec<char> = raw.chars().collect();
        for piece in chars.chunks(chunk) {
            let text: String = piece.iter().collect();
            artifact
                .handle(ArtifactEvent::Stream(StreamPart::text(text)))
                .unwrap();
        }
        artifact.handle(ArtifactEvent::StreamFinished).unwrap();
    }

    fn streamed(raw: &str) -> QuizArtifact {
        let mut artifact = QuizArtifact::new();
        stream_in(&mut artifact, raw, 7);
        artifact
    }

    #[test]
    fn test_stream_parses_and_commits() {
        let artifact = streamed(QUIZ);
        assert_eq!(artifact.content(), QUIZ);
        assert_eq!(artifact.document().unwrap().len(), 3);
        assert!(artifact.parse_error().is_none());
        assert_eq!(artifact.history().len(), 1);
        assert_eq!(artifact.stream_status(), StreamStatus::Finished);
    }

    #[test]
    fn test_other_stream_parts_ignored() {
        let mut artifact = QuizArtifact::new();
        let effect = artifact
            .handle(ArtifactEvent::Stream(StreamPart::Other { kind: "title".into() }))
            .unwrap();
        assert_eq!(effect, Effect::Ignored);
        assert!(artifact.content().is_empty());
    }

    #[test]
    fn test_full_attempt() {
        let mut artifact = streamed(QUIZ);
        for option in [0, 0, 0] {
            artifact
                .handle(ArtifactEvent::Interact(QuizAction::SelectAnswer(option)))
                .unwrap();
        }
        assert_eq!(artifact.state().phase(), Phase::Results);
        assert_eq!(artifact.state().score(), 2);
    }

    #[test]
    fn test_interaction_before_document_rejected() {
        let mut artifact = QuizArtifact::new();
        let err = artifact
            .handle(ArtifactEvent::Interact(QuizAction::SelectAnswer(0)))
            .unwrap_err();
        assert_eq!(err, DispatchError::Transition(TransitionError::NoDocument));
    }

    #[test]
    fn test_invalid_revision_keeps_previous_document() {
        let mut artifact = streamed(QUIZ);
        artifact.handle(ArtifactEvent::StreamStarted).unwrap();
        artifact
            .handle(ArtifactEvent::Stream(StreamPart::text("not json")))
            .unwrap();
        artifact.handle(ArtifactEvent::StreamFinished).unwrap();

        assert!(matches!(artifact.parse_error(), Some(ParseError::Syntax { .. })));
        assert_eq!(artifact.document().unwrap().title, "Borrowing");
        assert_eq!(artifact.history().len(), 2);
    }

    #[test]
    fn test_regeneration_resets_session() {
        let mut artifact = streamed(QUIZ);
        artifact
            .handle(ArtifactEvent::Interact(QuizAction::SelectAnswer(1)))
            .unwrap();
        assert!(!artifact.state().is_pristine());

        artifact.handle(ArtifactEvent::StreamStarted).unwrap();
        assert!(artifact.state().is_pristine());
    }

    #[test]
    fn test_reshaped_document_renormalizes_session() {
        let mut artifact = streamed(QUIZ);
        artifact
            .handle(ArtifactEvent::Interact(QuizAction::GoToQuestion(2)))
            .unwrap();

        // Content replaced in place, without a new streaming session
        let shorter = r#"{"title":"Borrowing","questions":[
            {"question":"Q1","options":["a","b"],"correct":0,"explanation":"E1"}]}"#;
        artifact.stream = StreamAccumulator::from_content(StreamConfig::default(), shorter);
        artifact.refresh();
        assert_eq!(artifact.document().unwrap().len(), 1);
        assert_eq!(artifact.state().current_question(), 0);
    }

    #[test]
    fn test_copy_exports_raw_text() {
        let mut artifact = streamed(QUIZ);
        let dispatched = artifact.dispatch(ActionId::CopyContent).unwrap();
        assert_eq!(dispatched.outcome, ActionOutcome::Exported(Arc::from(QUIZ)));
        assert_eq!(dispatched.notice, Some("Quiz JSON copied to clipboard!"));
    }

    #[test]
    fn test_copy_exports_live_content_while_browsing() {
        let mut artifact = streamed(QUIZ);
        let v2 = QUIZ.replace("Borrowing", "Lifetimes");
        stream_in(&mut artifact, &v2, 11);
        artifact.dispatch(ActionId::PreviousVersion).unwrap();
        assert_eq!(artifact.displayed_content(), QUIZ);

        let dispatched = artifact.dispatch(ActionId::CopyContent).unwrap();
        assert_eq!(dispatched.outcome, ActionOutcome::Exported(Arc::from(v2.as_str())));
    }

    #[test]
    fn test_reset_action() {
        let mut artifact = streamed(QUIZ);
        artifact
            .handle(ArtifactEvent::Interact(QuizAction::SelectAnswer(1)))
            .unwrap();
        let effect = artifact.handle(ArtifactEvent::Action(ActionId::ResetQuiz)).unwrap();
        assert_eq!(
            effect,
            Effect::Action(Dispatched {
                outcome: ActionOutcome::SessionReset,
                notice: Some("Quiz reset!"),
            })
        );
        assert!(artifact.state().is_pristine());
        assert_eq!(artifact.history().len(), 1);
        assert_eq!(artifact.content(), QUIZ);
    }

    #[test]
    fn test_version_actions_disabled_at_first() {
        let mut artifact = streamed(QUIZ);
        assert_eq!(
            artifact.dispatch(ActionId::PreviousVersion),
            Err(DispatchError::Disabled(ActionId::PreviousVersion))
        );
        assert_eq!(
            artifact.dispatch(ActionId::ViewChanges),
            Err(DispatchError::Disabled(ActionId::ViewChanges))
        );
        assert!(!artifact.enabled_actions().contains(ActionSet::NEXT_VERSION));
        assert!(artifact.enabled_actions().contains(ActionSet::RESET_QUIZ));
    }

    #[test]
    fn test_browse_versions() {
        let mut artifact = streamed(QUIZ);
        let v2 = QUIZ.replace("Borrowing", "Lifetimes");
        stream_in(&mut artifact, &v2, 11);
        assert_eq!(artifact.history().len(), 2);

        let dispatched = artifact.dispatch(ActionId::PreviousVersion).unwrap();
        assert_eq!(dispatched.outcome, ActionOutcome::VersionChanged(0));
        assert_eq!(dispatched.notice, None);
        assert_eq!(artifact.displayed_content(), QUIZ);
        assert!(artifact.enabled_actions().contains(ActionSet::NEXT_VERSION));

        let effect = artifact
            .handle(ArtifactEvent::Version(VersionChange::Latest))
            .unwrap();
        assert_eq!(effect, Effect::Viewing { index: 1, mode: ViewMode::Edit });
        assert_eq!(
            artifact.dispatch(ActionId::ViewChanges).map(|d| d.outcome),
            Ok(ActionOutcome::ModeChanged(ViewMode::Diff))
        );
    }

    #[test]
    fn test_version_change_prev_at_zero_reports_disabled() {
        let mut artifact = streamed(QUIZ);
        let err = artifact
            .handle(ArtifactEvent::Version(VersionChange::Prev))
            .unwrap_err();
        assert_eq!(err, DispatchError::Navigation(NavigationError::Disabled(Direction::Prev)));
    }

    #[test]
    fn test_request_goes_to_outbox() {
        let (outbox, rx) = Outbox::channel(4);
        let mut artifact = streamed(QUIZ).with_outbox(outbox);
        let dispatched = artifact.dispatch(ActionId::AddQuestions).unwrap();
        assert!(matches!(dispatched.outcome, ActionOutcome::Requested { delivered: true, .. }));
        let message = rx.try_recv().unwrap();
        assert_eq!(message.content, super::super::kind::ADD_QUESTIONS_INSTRUCTION);
    }

    #[test]
    fn test_request_without_outbox_not_delivered() {
        let mut artifact = streamed(QUIZ);
        let dispatched = artifact.dispatch(ActionId::Regenerate).unwrap();
        assert!(matches!(dispatched.outcome, ActionOutcome::Requested { delivered: false, .. }));
    }

    /// Quiz-shaped kind that counts session resets.
    #[derive(Debug)]
    struct CountingKind;

    impl ArtifactKind for CountingKind {
        type Document = String;
        type State = (QuizSession, usize);
        type Action = std::convert::Infallible;
        type Outcome = ();

        const ID: KindId = KindId::Quiz;

        fn parse(raw: &str) -> Result<String, ParseError> {
            Ok(raw.to_string())
        }

        fn apply(
            _document: Option<&String>,
            _state: &mut Self::State,
            action: Self::Action,
        ) -> Result<(), TransitionError> {
            match action {}
        }

        fn reset_session(state: &mut Self::State) {
            state.0.reset();
            state.1 += 1;
        }

        fn quiz_session(state: &Self::State) -> Option<&QuizSession> {
            Some(&state.0)
        }
    }

    #[test]
    fn test_reset_paths_use_kind_reset() {
        let mut artifact = Artifact::<CountingKind>::new();
        artifact.handle(ArtifactEvent::StreamStarted).unwrap();
        assert_eq!(artifact.state().1, 1);

        let dispatched = artifact.dispatch(ActionId::ResetQuiz).unwrap();
        assert_eq!(dispatched.outcome, ActionOutcome::SessionReset);
        assert_eq!(artifact.state().1, 2);
    }

    #[test]
    fn test_text_kind_rejects_quiz_actions() {
        let mut artifact = TextArtifact::new();
        assert_eq!(
            artifact.dispatch(ActionId::ResetQuiz),
            Err(DispatchError::Unsupported { kind: "text", action: ActionId::ResetQuiz })
        );
        artifact
            .handle(ArtifactEvent::Stream(StreamPart::text("Notes")))
            .unwrap();
        assert_eq!(artifact.document().map(String::as_str), Some("Notes"));
    }

    #[test]
    fn test_open_from_store() {
        let versions = vec![QUIZ.to_string(), QUIZ.replace("Q1", "First")];
        let artifact = QuizArtifact::open(ArtifactConfig::default(), versions.as_slice());
        assert_eq!(artifact.history().len(), 2);
        assert!(artifact.is_visible());
        assert_eq!(artifact.document().unwrap().questions[0].prompt, "First");
        assert_eq!(artifact.stream_status(), StreamStatus::Finished);
    }

    #[test]
    fn test_config_from_json() {
        let config = ArtifactConfig::from_json(r#"{"stream":{"visibility_min":10}}"#).unwrap();
        assert_eq!(config.stream.visibility_min, 10);
        assert_eq!(config.stream.visibility_max, 250);
    }

    #[test]
    fn test_transition_effect() {
        let mut artifact = streamed(QUIZ);
        let effect = artifact
            .handle(ArtifactEvent::Interact(QuizAction::Next))
            .unwrap();
        assert_eq!(effect, Effect::Transition(Transition::Moved { to: 1 }));
    }
}
