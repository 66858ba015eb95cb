//! Artifact: the unit the rest of the application talks to.
//!
//! An [`Artifact`] owns one artifact's raw content, its last valid
//! document, the kind's session state and the version history. Every
//! change arrives as an [`ArtifactEvent`] and is handled to completion by
//! [`Artifact::handle`]. Kinds plug in through [`ArtifactKind`].
//!
//! # Example
//!
//! ```
//! use quizflow::artifact::{ArtifactEvent, QuizArtifact};
//! use quizflow::quiz::QuizAction;
//! use quizflow::stream::StreamPart;
//!
//! let mut artifact = QuizArtifact::new();
//! artifact.handle(ArtifactEvent::StreamStarted).unwrap();
//! artifact
//!     .handle(ArtifactEvent::Stream(StreamPart::text(
//!         r#"{"title":"T","questions":[{"question":"Q","options":["a","b"],"correct":0,"explanation":"E"}]}"#,
//!     )))
//!     .unwrap();
//! artifact.handle(ArtifactEvent::StreamFinished).unwrap();
//! artifact.handle(ArtifactEvent::Interact(QuizAction::SelectAnswer(0))).unwrap();
//! assert_eq!(artifact.state().score(), 1);
//! ```
//!
//! For concurrent producers, [`ArtifactActor`] moves the artifact onto a
//! dedicated thread behind a bounded inbox.

mod actor;
#[allow(clippy::module_inception)]
mod artifact;
mod kind;
mod messages;

pub use actor::{ActorConfig, ArtifactActor, ArtifactUpdate};
pub use artifact::{Artifact, ArtifactConfig, QuizArtifact, TextArtifact};
pub use kind::{
    ArtifactKind, KindDescriptor, KindId, QuizKind, TextKind, ADD_QUESTIONS_INSTRUCTION,
    REGENERATE_INSTRUCTION,
};
pub use messages::{ArtifactEvent, Effect, EventResult, VersionChange};
