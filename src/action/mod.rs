//! Actions: Toolbar and action-bar commands.
//!
//! Each [`ActionId`] resolves to one [`ActionEffect`]: a local state
//! transition, a verbatim export of the raw content, or an outbound
//! request through the [`Outbox`]. Enablement depends only on the version
//! cursor and session, see [`ActionId::is_enabled`].
//!
//! Dispatching happens on the artifact, which owns the state the effects
//! touch.

mod dispatcher;
mod outbox;

pub use dispatcher::{
    enabled_actions, ActionContext, ActionEffect, ActionId, ActionOutcome, ActionSet, ActionSpec,
    Dispatched, Placement,
};
pub use outbox::{OutboundMessage, Outbox, Role};
