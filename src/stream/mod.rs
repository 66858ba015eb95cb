//! Streaming: Incremental accumulation of document text.
//!
//! This module turns a sequence of inbound stream parts into a growing raw
//! buffer. It performs no reordering: fragments are assumed to arrive in
//! order and are concatenated as-is.
//!
//! # Visibility
//!
//! The artifact becomes visible the first time the buffer crosses a narrow
//! length window (by default `200 < len < 250`). The decision is a pure
//! predicate over the lengths before and after an append, see
//! [`StreamConfig::crosses_window`].

mod accumulator;
mod part;

pub use accumulator::{AppendOutcome, StreamAccumulator, StreamConfig, StreamStatus};
pub use part::StreamPart;
