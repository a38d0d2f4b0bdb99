//! Error types surfaced by the client facade.

use std::fmt;

use thiserror::Error;

use crate::decode::ProtocolViolation;
use crate::editor::EditorError;
use crate::transport::TransportError;

/// Operation being executed when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientOperation {
    /// `initialize` handshake.
    Initialise,
    /// `textDocument/hover` handling.
    Hover,
    /// `textDocument/codeAction` handling.
    CodeAction,
    /// Resolving one deferred code action.
    ResolveCodeAction,
    /// Applying the picked member of an action group.
    ApplyActionGroup,
}

impl fmt::Display for ClientOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Initialise => "initialisation",
            Self::Hover => "hover",
            Self::CodeAction => "codeAction",
            Self::ResolveCodeAction => "resolveCodeAction",
            Self::ApplyActionGroup => "applyActionGroup",
        };
        formatter.write_str(label)
    }
}

/// Errors returned by [`crate::ActionClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport failed to deliver a request or its result.
    #[error("transport failed during {operation}: {source}")]
    Transport {
        /// Operation that failed.
        operation: ClientOperation,
        /// Underlying error.
        #[source]
        source: TransportError,
    },

    /// The server sent a payload shape the client does not accept.
    #[error("protocol contract violated during {operation}: {source}")]
    ContractViolation {
        /// Operation that received the payload.
        operation: ClientOperation,
        /// What was wrong with it.
        #[source]
        source: ProtocolViolation,
    },

    /// Request parameters could not be encoded.
    #[error("failed to encode parameters for {operation}: {source}")]
    Encode {
        /// Operation whose parameters failed to encode.
        operation: ClientOperation,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The editor could not apply a resolved edit.
    #[error("editor failed during {operation}: {source}")]
    Editor {
        /// Operation that produced the edit.
        operation: ClientOperation,
        /// Underlying error.
        #[source]
        source: EditorError,
    },

    /// A command routed to the client is not one it owns.
    #[error("command '{command}' is not handled by this client")]
    UnknownCommand {
        /// Command identifier that was routed.
        command: String,
    },
}

impl ClientError {
    pub(crate) const fn transport(operation: ClientOperation, source: TransportError) -> Self {
        Self::Transport { operation, source }
    }

    pub(crate) const fn violation(operation: ClientOperation, source: ProtocolViolation) -> Self {
        Self::ContractViolation { operation, source }
    }

    pub(crate) const fn encode(operation: ClientOperation, source: serde_json::Error) -> Self {
        Self::Encode { operation, source }
    }

    pub(crate) const fn editor(operation: ClientOperation, source: EditorError) -> Self {
        Self::Editor { operation, source }
    }

    /// Whether the error reports a server/client contract mismatch.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }
}
