//! Document slot: the last valid document plus the latest parse error.
//!
//! A failed parse never clears the view. The slot keeps showing the
//! previous document and records the error so it can be surfaced inline.

use crate::error::ParseError;
use std::sync::Arc;
use tracing::debug;

/// Result of refreshing a slot from new raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome<D> {
    /// The parse produced a document equal to the displayed one.
    Unchanged,
    /// The displayed document was replaced.
    Replaced {
        /// The document displayed before the refresh.
        previous: Option<Arc<D>>,
    },
    /// The parse failed; the previous document stays on display.
    Retained(ParseError),
}

/// Holder for the currently displayed document.
#[derive(Debug, Clone)]
pub struct DocumentSlot<D> {
    /// Last successfully parsed document.
    document: Option<Arc<D>>,
    /// Error from the latest parse, cleared on success.
    error: Option<ParseError>,
}

impl<D> Default for DocumentSlot<D> {
    fn default() -> Self {
        Self {
            document: None,
            error: None,
        }
    }
}

impl<D: PartialEq> DocumentSlot<D> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-run `parse` on `raw` and update the slot.
    pub fn refresh<F>(&mut self, raw: &str, parse: F) -> RefreshOutcome<D>
    where
        F: FnOnce(&str) -> Result<D, ParseError>,
    {
        match parse(raw) {
            Ok(document) => {
                self.error = None;
                if self.document.as_deref() == Some(&document) {
                    return RefreshOutcome::Unchanged;
                }
                let previous = self.document.replace(Arc::new(document));
                debug!(had_previous = previous.is_some(), "document replaced");
                RefreshOutcome::Replaced { previous }
            }
            Err(err) => {
                self.error = Some(err.clone());
                RefreshOutcome::Retained(err)
            }
        }
    }

    /// Drop the document and error, e.g. when a new revision starts.
    pub fn clear(&mut self) {
        self.document = None;
        self.error = None;
    }

    /// Get the displayed document.
    pub fn document(&self) -> Option<&Arc<D>> {
        self.document.as_ref()
    }

    /// Get the latest parse error.
    pub const fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }
}
