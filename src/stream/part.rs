//! Inbound stream parts.
//!
//! The upstream collaborator delivers a sequence of typed parts. Only
//! `text-delta` parts carry document text; every other type belongs to
//! other subsystems and is ignored here.

use serde::Deserialize;
use serde_json::Value;

/// A typed part of the inbound stream.
///
/// Deserializes from `{"type": "text-delta", "content": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WirePart")]
pub enum StreamPart {
    /// A fragment of document text.
    TextDelta(String),
    /// Any other part type.
    Other {
        /// The part's type tag.
        kind: String,
    },
}

/// Wire form of a stream part.
#[derive(Deserialize)]
struct WirePart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Value,
}

impl From<WirePart> for StreamPart {
    fn from(wire: WirePart) -> Self {
        match (wire.kind.as_str(), wire.content) {
            ("text-delta", Value::String(text)) => Self::TextDelta(text),
            _ => Self::Other { kind: wire.kind },
        }
    }
}

impl StreamPart {
    /// Create a text delta.
    pub fn text(fragment: impl Into<String>) -> Self {
        Self::TextDelta(fragment.into())
    }

    /// Get the text payload if this part carries document text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::TextDelta(text) => Some(text),
            Self::Other { .. } => None,
        }
    }

    /// Decode a part from its JSON wire form.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
