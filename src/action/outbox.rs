//! Outbound requests to the generation collaborator.
//!
//! Requests are fire-and-forget: the core formats a user message and
//! offers it to the channel without waiting. The reply, if any, re-enters
//! through the inbound stream as a new streaming session.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::Serialize;
use tracing::{debug, warn};

/// Author of an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The chat user.
    User,
}

/// A message appended to the conversation on the user's behalf.
///
/// Serializes as `{"role": "user", "content": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    /// Message author.
    pub role: Role,
    /// Instruction text.
    pub content: String,
}

impl OutboundMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Encode to the wire format.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Sending half of the append-message interface.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: Sender<OutboundMessage>,
}

impl Outbox {
    /// Wrap an existing sender.
    pub const fn new(tx: Sender<OutboundMessage>) -> Self {
        Self { tx }
    }

    /// Create an outbox and the receiver the collaborator drains.
    pub fn channel(capacity: usize) -> (Self, Receiver<OutboundMessage>) {
        let (tx, rx) = bounded(capacity);
        (Self::new(tx), rx)
    }

    /// Offer a message without blocking.
    ///
    /// Returns `false` if the message was dropped because the channel is
    /// full or the collaborator is gone.
    pub fn send(&self, message: OutboundMessage) -> bool {
        match self.tx.try_send(message) {
            Ok(()) => {
                debug!("outbound request sent");
                true
            }
            Err(TrySendError::Full(message)) => {
                warn!(content = %message.content, "outbound channel full, request dropped");
                false
            }
            Err(TrySendError::Disconnected(message)) => {
                warn!(content = %message.content, "generation collaborator gone, request dropped");
                false
            }
        }
    }
}
