//! Decoding of raw `textDocument/codeAction` results.
//!
//! Every element of the result list must match exactly one of three shapes:
//! a bare [`Command`], a fully specified [`CodeAction`] that carries an edit,
//! or a [`CodeActionStub`] whose edit is computed later. Anything else is a
//! [`ProtocolViolation`]; nothing is coerced.

use lsp_types::{CodeAction, CodeActionKind, Command, Diagnostic};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::display::DisplayAction;

/// Payload shapes the client does not accept from the server.
#[derive(Debug, Error)]
pub enum ProtocolViolation {
    /// The result was neither `null` nor a list.
    #[error("expected a list of code actions, got {kind}")]
    NotAList {
        /// JSON kind that was received.
        kind: &'static str,
    },

    /// A list element was not an object.
    #[error("code action at index {index} is not a JSON object")]
    NotAnObject {
        /// Position in the result list.
        index: usize,
    },

    /// A list element had no string `title`.
    #[error("code action at index {index} has no string title")]
    MissingTitle {
        /// Position in the result list.
        index: usize,
    },

    /// A code action carried a command, which only bare commands may do.
    #[error("code action '{title}' carries a command; code actions must not")]
    CommandInCodeAction {
        /// Title of the offending action.
        title: String,
    },

    /// A list element matched a shape but its fields did not decode.
    #[error("code action at index {index} is malformed: {source}")]
    Malformed {
        /// Position in the result list.
        index: usize,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// A request result did not decode into its expected type.
    #[error("result of '{method}' is malformed: {source}")]
    MalformedResult {
        /// Method whose result failed to decode.
        method: &'static str,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// A request that must answer with a value answered with `null`.
    #[error("result of '{method}' is missing")]
    MissingResult {
        /// Method that answered with `null`.
        method: &'static str,
    },

    /// A routed command received arguments of the wrong shape.
    #[error("arguments for command '{command}' are malformed: {reason}")]
    MalformedArguments {
        /// Command whose arguments failed to decode.
        command: String,
        /// What was wrong with them.
        reason: String,
    },
}

/// Code action sent without its edit; resolved when invoked.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeActionStub {
    /// Label shown to the user.
    pub title: String,
    /// Action kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CodeActionKind>,
    /// Diagnostics the action addresses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Vec<Diagnostic>>,
    /// Tag shared by actions that collapse into one entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Opaque identifier echoed back unchanged when resolving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

/// One decoded element of a code-action result list.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCodeAction {
    /// Unresolved action awaiting a resolve request.
    Stub(CodeActionStub),
    /// Fully specified action with its edit already computed.
    Action(CodeAction),
    /// Bare command.
    Command(Command),
}

impl RawCodeAction {
    /// Decodes the element at `index` of a result list.
    pub fn decode(index: usize, value: Value) -> Result<Self, ProtocolViolation> {
        let Value::Object(fields) = &value else {
            return Err(ProtocolViolation::NotAnObject { index });
        };
        if !matches!(fields.get("title"), Some(Value::String(_))) {
            return Err(ProtocolViolation::MissingTitle { index });
        }

        if matches!(fields.get("command"), Some(Value::String(_))) {
            let command = serde_json::from_value(value)
                .map_err(|source| ProtocolViolation::Malformed { index, source })?;
            return Ok(Self::Command(command));
        }

        if has_field(fields, "edit") || has_field(fields, "command") {
            let action: CodeAction = serde_json::from_value(value)
                .map_err(|source| ProtocolViolation::Malformed { index, source })?;
            if action.command.is_some() {
                return Err(ProtocolViolation::CommandInCodeAction {
                    title: action.title,
                });
            }
            return Ok(Self::Action(action));
        }

        let stub = serde_json::from_value(value)
            .map_err(|source| ProtocolViolation::Malformed { index, source })?;
        Ok(Self::Stub(stub))
    }
}

/// Decodes a whole `textDocument/codeAction` result.
///
/// `null` decodes to `None`, meaning the server offered no actions.
pub fn decode_code_actions(
    result: Option<Value>,
) -> Result<Option<Vec<RawCodeAction>>, ProtocolViolation> {
    match result {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| RawCodeAction::decode(index, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(ProtocolViolation::NotAList {
            kind: json_kind(&other),
        }),
    }
}

// Display actions have already crossed the decode boundary, so one carrying
// a command is trusted here.
impl From<DisplayAction> for RawCodeAction {
    fn from(action: DisplayAction) -> Self {
        Self::Action(CodeAction {
            title: action.title,
            kind: action.kind,
            diagnostics: (!action.diagnostics.is_empty()).then_some(action.diagnostics),
            edit: action.edit,
            command: action.command,
            ..CodeAction::default()
        })
    }
}

fn has_field(fields: &Map<String, Value>, name: &str) -> bool {
    fields.get(name).is_some_and(|value| !value.is_null())
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
