//! Protocol extensions layered on top of baseline LSP.
//!
//! The server may attach an `actions` bar to hover responses and may send
//! code actions as unresolved stubs carrying `group` and `id` fields. The
//! types here give those extension fields explicit, optional slots so the
//! rest of the crate never probes raw JSON for them.

use lsp_types::request::Request;
use lsp_types::{CodeActionParams, Hover, WorkspaceEdit};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command produced for every stub; resolves one deferred action.
pub const RESOLVE_CODE_ACTION_COMMAND: &str = "tether.resolveCodeAction";

/// Command produced for collapsed groups; applies the member the user picks.
pub const APPLY_ACTION_GROUP_COMMAND: &str = "tether.applyActionGroup";

/// Clickable command rendered as a link inside hover markup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandLink {
    /// Link label.
    pub title: String,
    /// Command identifier to invoke.
    pub command: String,
    /// Hover text for the link; the title is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Arguments passed to the command.
    #[serde(default)]
    pub arguments: Vec<Value>,
}

/// Labelled cluster of command links rendered on one row.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandLinkGroup {
    /// Optional row label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Links in display order.
    #[serde(default)]
    pub commands: Vec<CommandLink>,
}

/// Hover response with the optional `actions` sibling.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverWithActions {
    /// Baseline hover payload.
    #[serde(flatten)]
    pub hover: Hover,
    /// Action bar groups attached by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<CommandLinkGroup>>,
}

/// Sole argument of [`RESOLVE_CODE_ACTION_COMMAND`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveCodeActionParams {
    /// Opaque identifier the server assigned to the stub.
    #[serde(default)]
    pub id: Option<Value>,
    /// The request that produced the stub.
    pub code_action_params: CodeActionParams,
}

/// One member of a collapsed group, as carried by
/// [`APPLY_ACTION_GROUP_COMMAND`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGroupEntry {
    /// Title shown in the picker.
    pub label: String,
    /// First argument of the member's own invocation.
    pub arguments: Value,
}

/// `experimental/resolveCodeAction`: computes the edit for one stub.
#[derive(Debug)]
pub enum ResolveCodeActionRequest {}

impl Request for ResolveCodeActionRequest {
    type Params = ResolveCodeActionParams;
    type Result = Option<WorkspaceEdit>;
    const METHOD: &'static str = "experimental/resolveCodeAction";
}
