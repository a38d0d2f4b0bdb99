//! Client-side response transforms for a language server connection.
//!
//! The crate sits between an editor host and an LSP transport. Hover
//! responses are enriched with trusted code fences and a rendered action bar;
//! code-action responses are decoded, rewritten into lazily resolved actions,
//! and collapsed by group tag. The experimental protocol extensions behind
//! both are announced during the `initialize` handshake. The transport and the
//! editor stay behind the [`Transport`] and [`EditorHost`] traits so tests and
//! hosts can plug in their own implementations.

mod capability;
mod client;
mod decode;
mod display;
mod editor;
mod errors;
mod grouping;
mod hover;
mod protocol;
pub mod telemetry;
mod transport;

#[cfg(test)]
mod tests;

/// Log target for client records.
pub(crate) const CLIENT_TARGET: &str = "tether_client";

pub use capability::CapabilityAnnouncer;
pub use client::ActionClient;
pub use decode::{CodeActionStub, ProtocolViolation, RawCodeAction, decode_code_actions};
pub use display::{DisplayAction, EditorHover, MarkupBlock};
pub use editor::{EditorError, EditorHost};
pub use errors::{ClientError, ClientOperation};
pub use grouping::group_code_actions;
pub use hover::{
    GROUP_SEPARATOR, HoverEnricher, LINK_SEPARATOR, render_action_bar, render_command_link,
    render_group,
};
pub use protocol::{
    APPLY_ACTION_GROUP_COMMAND, ActionGroupEntry, CommandLink, CommandLinkGroup,
    HoverWithActions, RESOLVE_CODE_ACTION_COMMAND, ResolveCodeActionParams,
    ResolveCodeActionRequest,
};
pub use transport::{Transport, TransportError};
