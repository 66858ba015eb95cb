//! History module: Versioned snapshots and diffs shared by every artifact kind.
//!
//! This module contains:
//! - [`VersionHistory`]: append-only snapshots with a viewing cursor
//! - [`VersionStore`]: lookup interface of the external versioning store
//! - [`diff`]: line-level and field-level comparison of two snapshots

pub mod diff;
mod versions;

pub use diff::{compare, ContentDiff, DiffLine, DiffStats, FieldChange, LineChange, QuestionField};
pub use versions::{compare_in, Direction, VersionHistory, VersionStore, ViewMode};
