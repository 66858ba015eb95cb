//! Version history: append-only snapshots with a viewing cursor.

use super::diff::{compare, ContentDiff};
use crate::error::NavigationError;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Direction of a version step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards older versions.
    Prev,
    /// Towards newer versions.
    Next,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prev => f.write_str("previous"),
            Self::Next => f.write_str("next"),
        }
    }
}

/// How the viewed version is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// The viewed version itself.
    #[default]
    Edit,
    /// The viewed version compared with its predecessor.
    Diff,
}

/// Read access to stored document versions.
///
/// The surrounding versioning collaborator owns persistence; the core
/// only looks versions up by index.
pub trait VersionStore {
    /// Number of stored versions.
    fn version_count(&self) -> usize;

    /// Content of a version, if it exists.
    fn content_at(&self, index: usize) -> Option<Arc<str>>;
}

/// Compare two versions of any store.
pub fn compare_in<S: VersionStore + ?Sized>(
    store: &S,
    a: usize,
    b: usize,
) -> Result<ContentDiff, NavigationError> {
    let len = store.version_count();
    let old = store
        .content_at(a)
        .ok_or(NavigationError::OutOfRange { index: a, len })?;
    let new = store
        .content_at(b)
        .ok_or(NavigationError::OutOfRange { index: b, len })?;
    Ok(compare(&old, &new))
}

/// In-memory view of an artifact's committed revisions.
///
/// Entries are never modified once appended. The cursor always points at
/// an existing entry unless the history is empty.
#[derive(Debug, Clone, Default)]
pub struct VersionHistory {
    /// Committed snapshots, oldest first.
    versions: Vec<Arc<str>>,
    /// Index of the viewed version.
    cursor: usize,
    /// Presentation mode.
    mode: ViewMode,
}

impl VersionHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every version of an external store.
    pub fn from_store<S: VersionStore + ?Sized>(store: &S) -> Self {
        let mut history = Self::new();
        history.sync_from(store);
        history
    }

    /// Append versions the store has beyond this history's length.
    ///
    /// Returns the number of versions appended. The cursor moves to the
    /// latest version if anything was appended.
    pub fn sync_from<S: VersionStore + ?Sized>(&mut self, store: &S) -> usize {
        let before = self.versions.len();
        for index in before..store.version_count() {
            match store.content_at(index) {
                Some(content) => self.versions.push(content),
                None => break,
            }
        }
        let appended = self.versions.len() - before;
        if appended > 0 {
            self.cursor = self.versions.len() - 1;
            debug!(appended, len = self.versions.len(), "versions synced");
        }
        appended
    }

    /// Commit a new version and view it. Returns its index.
    pub fn append(&mut self, content: impl Into<Arc<str>>) -> usize {
        self.versions.push(content.into());
        self.cursor = self.versions.len() - 1;
        debug!(index = self.cursor, "version committed");
        self.cursor
    }

    /// Number of versions.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Check if no version was committed.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Index of the viewed version.
    pub const fn current_index(&self) -> usize {
        self.cursor
    }

    /// Index of the newest version.
    pub fn latest_index(&self) -> Option<usize> {
        self.versions.len().checked_sub(1)
    }

    /// Check if the viewed version is the newest one.
    ///
    /// An empty history counts as being at the latest version.
    pub fn is_at_latest(&self) -> bool {
        self.latest_index().map_or(true, |latest| self.cursor == latest)
    }

    /// Content of a version.
    pub fn get(&self, index: usize) -> Option<&Arc<str>> {
        self.versions.get(index)
    }

    /// Content of the viewed version.
    pub fn viewed(&self) -> Option<&Arc<str>> {
        self.versions.get(self.cursor)
    }

    /// Presentation mode.
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Check whether a step is enabled.
    pub fn can_step(&self, direction: Direction) -> bool {
        match direction {
            Direction::Prev => self.cursor > 0,
            Direction::Next => !self.is_at_latest(),
        }
    }

    /// Move the cursor one version. Disabled steps change nothing.
    pub fn step(&mut self, direction: Direction) -> Result<usize, NavigationError> {
        if self.is_empty() {
            return Err(NavigationError::Empty);
        }
        if !self.can_step(direction) {
            return Err(NavigationError::Disabled(direction));
        }

        self.cursor = match direction {
            Direction::Prev => self.cursor - 1,
            Direction::Next => self.cursor + 1,
        };
        if self.cursor == 0 {
            self.mode = ViewMode::Edit;
        }
        debug!(%direction, index = self.cursor, "version step");
        Ok(self.cursor)
    }

    /// View a specific version.
    pub fn go_to(&mut self, index: usize) -> Result<usize, NavigationError> {
        if index >= self.versions.len() {
            return Err(NavigationError::OutOfRange {
                index,
                len: self.versions.len(),
            });
        }
        self.cursor = index;
        if index == 0 {
            self.mode = ViewMode::Edit;
        }
        Ok(index)
    }

    /// View the newest version in edit mode.
    pub fn go_to_latest(&mut self) {
        self.cursor = self.latest_index().unwrap_or(0);
        self.mode = ViewMode::Edit;
    }

    /// Switch between edit and diff mode.
    ///
    /// Diff mode compares the viewed version with its predecessor, so it is
    /// unavailable at version 0.
    pub fn toggle_diff(&mut self) -> Result<ViewMode, NavigationError> {
        self.mode = match self.mode {
            ViewMode::Diff => ViewMode::Edit,
            ViewMode::Edit if self.cursor == 0 => return Err(NavigationError::NoPredecessor),
            ViewMode::Edit => ViewMode::Diff,
        };
        Ok(self.mode)
    }

    /// Compare two versions.
    pub fn compare(&self, a: usize, b: usize) -> Result<ContentDiff, NavigationError> {
        compare_in(self, a, b)
    }

    /// Diff of the viewed version against its predecessor.
    pub fn diff_view(&self) -> Option<ContentDiff> {
        let prev = self.cursor.checked_sub(1)?;
        self.compare(prev, self.cursor).ok()
    }
}

impl VersionStore for VersionHistory {
    fn version_count(&self) -> usize {
        self.versions.len()
    }

    fn content_at(&self, index: usize) -> Option<Arc<str>> {
        self.versions.get(index).cloned()
    }
}

impl VersionStore for [String] {
    fn version_count(&self) -> usize {
        self.len()
    }

    fn content_at(&self, index: usize) -> Option<Arc<str>> {
        self.get(index).map(|s| Arc::from(s.as_str()))
    }
}
