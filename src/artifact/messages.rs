//! Message types for artifact events.
//!
//! These enums define the protocol between the surrounding application
//! and an artifact. Every mutation of artifact state is the handling of
//! exactly one [`ArtifactEvent`].

use crate::action::{ActionId, Dispatched};
use crate::error::DispatchError;
use crate::history::ViewMode;
use crate::stream::{AppendOutcome, StreamPart};

/// A version-change notification from the versioning collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChange {
    /// Switch between edit and diff view.
    Toggle,
    /// View the previous version.
    Prev,
    /// View the next version.
    Next,
    /// View the newest version.
    Latest,
}

/// Events delivered to an artifact.
///
/// `A` is the kind's interaction type.
#[derive(Debug, Clone)]
pub enum ArtifactEvent<A> {
    /// A new streaming session starts (first generation or regeneration).
    StreamStarted,
    /// A part of the inbound stream.
    Stream(StreamPart),
    /// The stream ended; the content is committed as a version.
    StreamFinished,
    /// The user interacted with the document.
    Interact(A),
    /// The user invoked an action-bar or toolbar command.
    Action(ActionId),
    /// The versioning collaborator changed the viewed version.
    Version(VersionChange),
}

/// Effect of a handled event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<O> {
    /// The event was not meant for this artifact.
    Ignored,
    /// A streaming session started; session state was reset.
    Started,
    /// A fragment was offered to the accumulator.
    Appended(AppendOutcome),
    /// The stream ended.
    Finished {
        /// Index of the committed version, if content was committed.
        version: Option<usize>,
    },
    /// An interaction was applied.
    Transition(O),
    /// An action was dispatched.
    Action(Dispatched),
    /// The viewed version or view mode changed.
    Viewing {
        /// Index of the viewed version.
        index: usize,
        /// Presentation mode.
        mode: ViewMode,
    },
}

/// Result of handling one event.
pub type EventResult<O> = Result<Effect<O>, DispatchError>;
