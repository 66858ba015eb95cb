//! View module: Pure projections of artifact state for a renderer.
//!
//! Nothing here mutates an artifact. [`QuizView::build`] decides between
//! the loading, error, diff, read-only version, question and results
//! screens and precomputes labels, progress and option markings.

mod quiz_view;
mod text;

pub use quiz_view::{
    NavItem, OptionMark, OptionView, QuestionView, QuizView, ResultsView, ReviewView, ViewConfig,
};
pub use text::{display_width, option_label, truncate_to_width, ELLIPSIS};
