//! Editor-native results handed back to the host.

use lsp_types::{CodeAction, CodeActionKind, Command, Diagnostic, MarkupKind, Range, WorkspaceEdit};
use serde::Serialize;
use serde_json::Value;

/// Action as the editor displays it: a title and at most one invocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayAction {
    /// Label shown in the lightbulb menu.
    pub title: String,
    /// Action kind used by the editor for filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<CodeActionKind>,
    /// Diagnostics this action addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    /// Edit applied directly when the action already carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<WorkspaceEdit>,
    /// Invocation run when the user picks the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,
}

impl DisplayAction {
    /// Builds an action whose only behaviour is `command`.
    #[must_use]
    pub fn with_command(
        title: impl Into<String>,
        kind: Option<CodeActionKind>,
        command: Command,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            diagnostics: Vec::new(),
            edit: None,
            command: Some(command),
        }
    }

    /// First argument of the attached invocation.
    #[must_use]
    pub fn first_argument(&self) -> Option<&Value> {
        self.command
            .as_ref()
            .and_then(|command| command.arguments.as_ref())
            .and_then(|arguments| arguments.first())
    }

    /// Identifier of the attached invocation.
    #[must_use]
    pub fn command_id(&self) -> Option<&str> {
        self.command.as_ref().map(|command| command.command.as_str())
    }
}

impl From<CodeAction> for DisplayAction {
    fn from(action: CodeAction) -> Self {
        Self {
            title: action.title,
            kind: action.kind,
            diagnostics: action.diagnostics.unwrap_or_default(),
            edit: action.edit,
            command: action.command,
        }
    }
}

impl From<Command> for DisplayAction {
    fn from(command: Command) -> Self {
        Self {
            title: command.title.clone(),
            kind: None,
            diagnostics: Vec::new(),
            edit: None,
            command: Some(command),
        }
    }
}

/// Single block of hover markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupBlock {
    /// How `value` is interpreted.
    pub kind: MarkupKind,
    /// Block text.
    pub value: String,
    /// Whether command links inside the block may run.
    pub is_trusted: bool,
}

impl MarkupBlock {
    /// Untrusted markdown block.
    #[must_use]
    pub fn markdown(value: impl Into<String>) -> Self {
        Self {
            kind: MarkupKind::Markdown,
            value: value.into(),
            is_trusted: false,
        }
    }

    /// Returns the block with its trust flag set.
    #[must_use]
    pub fn trusted(mut self) -> Self {
        self.is_trusted = true;
        self
    }
}

/// Hover as the editor renders it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorHover {
    /// Blocks in display order.
    pub contents: Vec<MarkupBlock>,
    /// Range the hover applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
}
