//! # Quizflow
//!
//! Incremental document state machine for streamed quiz artifacts.
//!
//! A generator streams the quiz as JSON text fragments. Quizflow accumulates
//! the fragments, re-parses the growing buffer into a typed document, drives
//! the user's progress through the quiz, records every finished revision as
//! an immutable version and dispatches the artifact's toolbar commands.
//!
//! ## Core Concepts
//!
//! - **Streaming accumulation**: Append-only buffer with a one-shot visibility trigger
//! - **Tolerant parsing**: Partial content never replaces the last valid document
//! - **Progression state machine**: Answer, navigate, score and retake
//! - **Version history**: Immutable snapshots with line and field diffs
//! - **Explicit reducer**: Every change is one [`ArtifactEvent`] handled to completion
//!
//! ## Example
//!
//! ```rust
//! use quizflow::{ArtifactEvent, QuizAction, QuizArtifact, StreamPart};
//!
//! let mut artifact = QuizArtifact::new();
//! artifact.handle(ArtifactEvent::StreamStarted).unwrap();
//! for fragment in [
//!     r#"{"title":"Ownership","questions":[{"question":"Who owns a moved value?","#,
//!     r#""options":["The caller","The callee"],"correct":1,"explanation":"Moves transfer ownership."}]}"#,
//! ] {
//!     artifact.handle(ArtifactEvent::Stream(StreamPart::text(fragment))).unwrap();
//! }
//! artifact.handle(ArtifactEvent::StreamFinished).unwrap();
//!
//! artifact.handle(ArtifactEvent::Interact(QuizAction::SelectAnswer(1))).unwrap();
//! assert_eq!(artifact.state().score(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod action;
pub mod artifact;
pub mod document;
pub mod error;
pub mod history;
pub mod quiz;
pub mod stream;
pub mod view;

// Re-exports for convenience
pub use action::{ActionId, ActionOutcome, ActionSet, Dispatched, OutboundMessage, Outbox};
pub use artifact::{
    ActorConfig, Artifact, ArtifactActor, ArtifactConfig, ArtifactEvent, ArtifactKind, Effect,
    KindId, QuizArtifact, QuizKind, TextArtifact, TextKind, VersionChange,
};
pub use document::{parse, Question, QuizDocument};
pub use error::{DispatchError, NavigationError, ParseError, Result, TransitionError};
pub use history::{ContentDiff, Direction, VersionHistory, VersionStore, ViewMode};
pub use quiz::{QuizAction, QuizResults, QuizSession, Transition};
pub use stream::{StreamAccumulator, StreamConfig, StreamPart};
pub use view::{QuizView, ViewConfig};
