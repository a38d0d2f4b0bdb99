//! Experimental protocol features the client may announce.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Protocol extension negotiated under the `experimental` capability namespace.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, EnumString,
    Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum ExperimentalFeature {
    /// Workspace edits whose text may contain snippet placeholders.
    SnippetTextEdit,
    /// Code actions tagged with a `group` to be collapsed client-side.
    CodeActionGroup,
    /// Code actions sent without edits and resolved on invocation.
    ResolveCodeAction,
    /// Hover responses carrying an `actions` bar.
    HoverActions,
}

impl ExperimentalFeature {
    /// Every feature, in announcement order.
    pub const ALL: [Self; 4] = [
        Self::SnippetTextEdit,
        Self::CodeActionGroup,
        Self::ResolveCodeAction,
        Self::HoverActions,
    ];

    /// Key written into the capability payload.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SnippetTextEdit => "snippetTextEdit",
            Self::CodeActionGroup => "codeActionGroup",
            Self::ResolveCodeAction => "resolveCodeAction",
            Self::HoverActions => "hoverActions",
        }
    }
}

/// Per-feature toggles. Every feature is enabled unless switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentalFeatures {
    /// Toggle for [`ExperimentalFeature::SnippetTextEdit`].
    #[serde(default = "crate::defaults::enabled")]
    pub snippet_text_edit: bool,
    /// Toggle for [`ExperimentalFeature::CodeActionGroup`].
    #[serde(default = "crate::defaults::enabled")]
    pub code_action_group: bool,
    /// Toggle for [`ExperimentalFeature::ResolveCodeAction`].
    #[serde(default = "crate::defaults::enabled")]
    pub resolve_code_action: bool,
    /// Toggle for [`ExperimentalFeature::HoverActions`].
    #[serde(default = "crate::defaults::enabled")]
    pub hover_actions: bool,
}

impl Default for ExperimentalFeatures {
    fn default() -> Self {
        Self {
            snippet_text_edit: true,
            code_action_group: true,
            resolve_code_action: true,
            hover_actions: true,
        }
    }
}

impl ExperimentalFeatures {
    /// Whether the feature is switched on.
    #[must_use]
    pub const fn is_enabled(&self, feature: ExperimentalFeature) -> bool {
        match feature {
            ExperimentalFeature::SnippetTextEdit => self.snippet_text_edit,
            ExperimentalFeature::CodeActionGroup => self.code_action_group,
            ExperimentalFeature::ResolveCodeAction => self.resolve_code_action,
            ExperimentalFeature::HoverActions => self.hover_actions,
        }
    }

    /// Switches a feature on or off.
    pub const fn set(&mut self, feature: ExperimentalFeature, enabled: bool) {
        match feature {
            ExperimentalFeature::SnippetTextEdit => self.snippet_text_edit = enabled,
            ExperimentalFeature::CodeActionGroup => self.code_action_group = enabled,
            ExperimentalFeature::ResolveCodeAction => self.resolve_code_action = enabled,
            ExperimentalFeature::HoverActions => self.hover_actions = enabled,
        }
    }
}
