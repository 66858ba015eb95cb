//! Document module: Parsing raw content into structured quiz documents.
//!
//! This module contains:
//! - [`QuizDocument`] and [`Question`]: the structured quiz
//! - [`parse`]: pure, idempotent validation of a raw buffer
//! - [`DocumentSlot`]: keeps the last valid document on display

mod model;
mod parser;
mod slot;

pub use model::{DocumentShape, Question, QuizDocument};
pub use parser::{parse, validate, MIN_OPTIONS};
pub use slot::{DocumentSlot, RefreshOutcome};
