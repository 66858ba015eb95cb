//! Stream Accumulator: Append-only raw buffer for streamed document text.
//!
//! The accumulator is the only writer of an artifact's raw content. It
//! concatenates fragments in arrival order and decides, once per
//! streaming session, when the artifact should become visible.
//!
//! Lengths are measured in UTF-16 code units, the unit hosts rendering the
//! artifact use for text length.
//!
//! # Usage
//!
//! ```
//! use quizflow::stream::{AppendOutcome, StreamAccumulator};
//!
//! let mut acc = StreamAccumulator::new();
//! acc.begin();
//! assert!(matches!(acc.append("{\"title\":"), AppendOutcome::Appended { .. }));
//! assert_eq!(acc.content(), "{\"title\":");
//! ```

use serde::Deserialize;
use tracing::{debug, trace};

/// Configuration for the stream accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Length (exclusive) the buffer must exceed to become visible.
    pub visibility_min: usize,
    /// Length (exclusive) the buffer must stay under when visibility fires.
    pub visibility_max: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            visibility_min: 200,
            visibility_max: 250,
        }
    }
}

impl StreamConfig {
    /// Decide whether an append from `prior_len` to `new_len` opens the
    /// visibility window.
    ///
    /// The window is crossed when the length goes from `<= visibility_min`
    /// to `> visibility_min` and is still `< visibility_max`. A single
    /// fragment that jumps over the whole window never triggers.
    pub const fn crosses_window(&self, prior_len: usize, new_len: usize) -> bool {
        prior_len <= self.visibility_min
            && new_len > self.visibility_min
            && new_len < self.visibility_max
    }
}

/// Lifecycle of the raw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamStatus {
    /// No stream has produced content yet.
    #[default]
    Idle,
    /// A stream is delivering fragments.
    Streaming,
    /// The stream finished; content is immutable.
    Finished,
}

/// Result of an append operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The fragment was concatenated to the buffer.
    Appended {
        /// Number of UTF-16 code units appended.
        units: usize,
        /// Buffer length in UTF-16 code units after the append.
        total: usize,
        /// Whether this append made the artifact visible.
        became_visible: bool,
    },
    /// Nothing was appended (empty fragment).
    Empty,
    /// The stream already finished; the buffer is immutable.
    Sealed,
}

/// Append-only buffer for one artifact's raw content.
#[derive(Debug, Clone, Default)]
pub struct StreamAccumulator {
    /// Configuration.
    config: StreamConfig,
    /// Raw content.
    content: String,
    /// Length of `content` in UTF-16 code units.
    len_utf16: usize,
    /// Current lifecycle status.
    status: StreamStatus,
    /// Whether the artifact is visible to the user.
    visible: bool,
    /// Whether visibility already fired in this session.
    fired: bool,
}

impl StreamAccumulator {
    /// Create an empty accumulator with default configuration.
    pub fn new() -> Self {
        Self::with_config(StreamConfig::default())
    }

    /// Create an empty accumulator with custom configuration.
    pub fn with_config(config: StreamConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a finished accumulator holding already-complete content.
    ///
    /// Used when an artifact is opened from a stored version rather than
    /// a live stream.
    pub fn from_content(config: StreamConfig, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            config,
            len_utf16: content.encode_utf16().count(),
            content,
            status: StreamStatus::Finished,
            visible: true,
            fired: true,
        }
    }

    /// Start a new streaming session.
    ///
    /// The buffer is cleared for the incoming revision and the visibility
    /// trigger is re-armed. Visibility itself is never reset here.
    pub fn begin(&mut self) {
        debug!(prior_len = self.len_utf16, "stream session started");
        self.content.clear();
        self.len_utf16 = 0;
        self.status = StreamStatus::Streaming;
        self.fired = false;
    }

    /// Append a fragment to the buffer.
    ///
    /// Appending to an idle accumulator implicitly starts streaming.
    pub fn append(&mut self, fragment: &str) -> AppendOutcome {
        if self.status == StreamStatus::Finished {
            trace!(len = fragment.len(), "append after finish ignored");
            return AppendOutcome::Sealed;
        }
        if fragment.is_empty() {
            return AppendOutcome::Empty;
        }

        self.status = StreamStatus::Streaming;
        let prior_len = self.len_utf16;
        let units = fragment.encode_utf16().count();
        self.content.push_str(fragment);
        self.len_utf16 += units;

        let became_visible = !self.fired && self.config.crosses_window(prior_len, self.len_utf16);
        if became_visible {
            self.fired = true;
            if !self.visible {
                debug!(len = self.len_utf16, "artifact became visible");
            }
            self.visible = true;
        }

        AppendOutcome::Appended {
            units,
            total: self.len_utf16,
            became_visible,
        }
    }

    /// Seal the buffer. Returns `false` if it was already finished.
    pub fn finish(&mut self) -> bool {
        if self.status == StreamStatus::Finished {
            return false;
        }
        debug!(len = self.len_utf16, "stream session finished");
        self.status = StreamStatus::Finished;
        true
    }

    /// Make the artifact visible regardless of the window.
    pub const fn show(&mut self) {
        self.visible = true;
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the content length in UTF-16 code units.
    pub const fn len(&self) -> usize {
        self.len_utf16
    }

    /// Check if the buffer is empty.
    pub const fn is_empty(&self) -> bool {
        self.len_utf16 == 0
    }

    /// Get the lifecycle status.
    pub const fn status(&self) -> StreamStatus {
        self.status
    }

    /// Check if a stream is currently delivering fragments.
    pub fn is_streaming(&self) -> bool {
        self.status == StreamStatus::Streaming
    }

    /// Check whether the artifact is visible.
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Get the configuration.
    pub const fn config(&self) -> &StreamConfig {
        &self.config
    }
}
