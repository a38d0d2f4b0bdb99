//! Client facade that runs response transforms between editor and server.

use lsp_types::request::{CodeActionRequest, HoverRequest, Initialize, Request};
use lsp_types::{
    CodeActionParams, Command, HoverParams, InitializeParams, InitializeResult,
    ServerCapabilities, WorkspaceEdit,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tether_config::Config;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_subscriber::fmt::MakeWriter;

use crate::CLIENT_TARGET;
use crate::capability::CapabilityAnnouncer;
use crate::decode::{ProtocolViolation, decode_code_actions};
use crate::display::{DisplayAction, EditorHover};
use crate::editor::EditorHost;
use crate::errors::{ClientError, ClientOperation};
use crate::grouping::group_code_actions;
use crate::hover::HoverEnricher;
use crate::protocol::{
    APPLY_ACTION_GROUP_COMMAND, ActionGroupEntry, HoverWithActions, RESOLVE_CODE_ACTION_COMMAND,
    ResolveCodeActionParams, ResolveCodeActionRequest,
};
use crate::telemetry::{self, TelemetryError};
use crate::transport::{Transport, TransportError};

enum SessionState {
    Pending,
    Ready { capabilities: Box<ServerCapabilities> },
}

/// Mediates hover and code-action traffic for one server connection.
///
/// Transport failures on the hover and code-action paths are logged and
/// reported as "no result" so editing is never interrupted. Contract
/// violations are shown through the editor host and returned as errors.
pub struct ActionClient {
    transport: Box<dyn Transport>,
    editor: Box<dyn EditorHost>,
    announcer: CapabilityAnnouncer,
    enricher: HoverEnricher,
    state: SessionState,
}

impl ActionClient {
    /// Builds a client over the supplied seams.
    #[must_use]
    pub fn new(
        transport: Box<dyn Transport>,
        editor: Box<dyn EditorHost>,
        config: &Config,
    ) -> Self {
        Self {
            transport,
            editor,
            announcer: CapabilityAnnouncer::from_config(config),
            enricher: HoverEnricher::from_config(config),
            state: SessionState::Pending,
        }
    }

    /// Builds a client and routes its records to the host's trace channel.
    ///
    /// The channel is installed process-wide on the first call; later
    /// clients share it.
    pub fn start<W>(
        transport: Box<dyn Transport>,
        editor: Box<dyn EditorHost>,
        config: &Config,
        trace: W,
    ) -> Result<Self, TelemetryError>
    where
        W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
    {
        if telemetry::initialise(config, trace)? {
            info!(
                target: CLIENT_TARGET,
                filter = config.log_filter(),
                format = %config.log_format(),
                "trace channel installed"
            );
        }
        Ok(Self::new(transport, editor, config))
    }

    /// Runs the `initialize` handshake with the experimental flags announced.
    pub fn initialise(
        &mut self,
        mut params: InitializeParams,
        cancel: &CancellationToken,
    ) -> Result<InitializeResult, ClientError> {
        let operation = ClientOperation::Initialise;
        self.announcer.announce(&mut params.capabilities);
        let result = self.send::<Initialize>(operation, &params, cancel)?;
        let initialised: InitializeResult = match result {
            Some(value) => self.decode_result::<Initialize, _>(operation, value)?,
            None => {
                return Err(self.violation(
                    operation,
                    ProtocolViolation::MissingResult {
                        method: Initialize::METHOD,
                    },
                ));
            }
        };
        info!(
            target: CLIENT_TARGET,
            server = ?initialised.server_info.as_ref().map(|info| info.name.as_str()),
            "language server initialised"
        );
        self.state = SessionState::Ready {
            capabilities: Box::new(initialised.capabilities.clone()),
        };
        Ok(initialised)
    }

    /// Capabilities reported by the server, once initialised.
    #[must_use]
    pub fn server_capabilities(&self) -> Option<&ServerCapabilities> {
        match &self.state {
            SessionState::Ready { capabilities } => Some(&**capabilities),
            SessionState::Pending => None,
        }
    }

    /// Requests a hover and enriches it for display.
    pub fn hover(
        &mut self,
        params: &HoverParams,
        cancel: &CancellationToken,
    ) -> Result<Option<EditorHover>, ClientError> {
        let operation = ClientOperation::Hover;
        let Some(value) = recover(operation, self.send::<HoverRequest>(operation, params, cancel))?
        else {
            return Ok(None);
        };
        let hover: HoverWithActions = self.decode_result::<HoverRequest, _>(operation, value)?;
        Ok(Some(self.enricher.enrich(hover)))
    }

    /// Requests code actions and groups them for display.
    ///
    /// `Ok(None)` means there are no actions to show, either because the
    /// server offered none or because the request failed in transit.
    pub fn code_actions(
        &mut self,
        params: &CodeActionParams,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<DisplayAction>>, ClientError> {
        let operation = ClientOperation::CodeAction;
        let result = recover(
            operation,
            self.send::<CodeActionRequest>(operation, params, cancel),
        )?;
        let raw = match decode_code_actions(result) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(violation) => return Err(self.violation(operation, violation)),
        };
        group_code_actions(params, raw)
            .map(Some)
            .map_err(|source| ClientError::encode(operation, source))
    }

    /// Routes one of the client-owned commands produced by
    /// [`Self::code_actions`].
    ///
    /// Returns whether an edit was applied.
    pub fn execute_command(
        &mut self,
        command: &Command,
        cancel: &CancellationToken,
    ) -> Result<bool, ClientError> {
        match command.command.as_str() {
            RESOLVE_CODE_ACTION_COMMAND => {
                let operation = ClientOperation::ResolveCodeAction;
                let params: ResolveCodeActionParams = self.command_argument(operation, command)?;
                self.resolve_code_action(&params, cancel)
            }
            APPLY_ACTION_GROUP_COMMAND => {
                let operation = ClientOperation::ApplyActionGroup;
                let entries: Vec<ActionGroupEntry> = self.command_argument(operation, command)?;
                self.apply_action_group(&entries, cancel)
            }
            other => Err(ClientError::UnknownCommand {
                command: other.to_owned(),
            }),
        }
    }

    /// Resolves a deferred action and applies the resulting edit.
    ///
    /// Returns `false` when the server had no edit to offer.
    pub fn resolve_code_action(
        &mut self,
        params: &ResolveCodeActionParams,
        cancel: &CancellationToken,
    ) -> Result<bool, ClientError> {
        let operation = ClientOperation::ResolveCodeAction;
        let Some(value) = self.send::<ResolveCodeActionRequest>(operation, params, cancel)? else {
            return Ok(false);
        };
        let resolved: Option<WorkspaceEdit> =
            self.decode_result::<ResolveCodeActionRequest, _>(operation, value)?;
        let Some(edit) = resolved else {
            return Ok(false);
        };
        self.editor
            .apply_workspace_edit(edit)
            .map_err(|source| ClientError::editor(operation, source))?;
        debug!(
            target: CLIENT_TARGET,
            id = ?params.id,
            "applied resolved code action"
        );
        Ok(true)
    }

    /// Lets the user pick one member of a collapsed group and resolves it.
    ///
    /// Returns `false` when the pick is dismissed.
    pub fn apply_action_group(
        &mut self,
        entries: &[ActionGroupEntry],
        cancel: &CancellationToken,
    ) -> Result<bool, ClientError> {
        let operation = ClientOperation::ApplyActionGroup;
        let labels: Vec<String> = entries.iter().map(|entry| entry.label.clone()).collect();
        let Some(choice) = self.editor.pick(&labels) else {
            debug!(target: CLIENT_TARGET, "action group pick dismissed");
            return Ok(false);
        };
        let Some(entry) = entries.get(choice) else {
            warn!(
                target: CLIENT_TARGET,
                choice,
                options = entries.len(),
                "editor picked an action outside the group"
            );
            return Ok(false);
        };
        let params: ResolveCodeActionParams = serde_json::from_value(entry.arguments.clone())
            .map_err(|source| {
                self.violation(
                    operation,
                    ProtocolViolation::MalformedArguments {
                        command: APPLY_ACTION_GROUP_COMMAND.to_owned(),
                        reason: source.to_string(),
                    },
                )
            })?;
        self.resolve_code_action(&params, cancel)
    }

    fn send<R: Request>(
        &mut self,
        operation: ClientOperation,
        params: &R::Params,
        cancel: &CancellationToken,
    ) -> Result<Option<Value>, ClientError> {
        let encoded =
            serde_json::to_value(params).map_err(|source| ClientError::encode(operation, source))?;
        if cancel.is_cancelled() {
            return Err(ClientError::transport(operation, TransportError::Cancelled));
        }
        debug!(target: CLIENT_TARGET, method = R::METHOD, "sending request");
        match self.transport.send_request(R::METHOD, encoded, cancel) {
            Ok(Some(Value::Null)) | Ok(None) => Ok(None),
            Ok(Some(value)) => Ok(Some(value)),
            Err(source) => Err(ClientError::transport(operation, source)),
        }
    }

    fn decode_result<R: Request, T: DeserializeOwned>(
        &mut self,
        operation: ClientOperation,
        value: Value,
    ) -> Result<T, ClientError> {
        serde_json::from_value(value).map_err(|source| {
            self.violation(
                operation,
                ProtocolViolation::MalformedResult {
                    method: R::METHOD,
                    source,
                },
            )
        })
    }

    fn command_argument<T: DeserializeOwned>(
        &mut self,
        operation: ClientOperation,
        command: &Command,
    ) -> Result<T, ClientError> {
        let decoded = match command.arguments.as_deref() {
            Some([argument, ..]) => {
                serde_json::from_value(argument.clone()).map_err(|source| source.to_string())
            }
            _ => Err(String::from("expected one argument")),
        };
        decoded.map_err(|reason| {
            self.violation(
                operation,
                ProtocolViolation::MalformedArguments {
                    command: command.command.clone(),
                    reason,
                },
            )
        })
    }

    fn violation(&mut self, operation: ClientOperation, source: ProtocolViolation) -> ClientError {
        let failure = ClientError::violation(operation, source);
        let message = failure.to_string();
        error!(target: CLIENT_TARGET, %operation, "{message}");
        self.editor.show_error(&message);
        failure
    }
}

/// Turns a transport failure into "no result"; other errors pass through.
fn recover(
    operation: ClientOperation,
    result: Result<Option<Value>, ClientError>,
) -> Result<Option<Value>, ClientError> {
    match result {
        Err(ClientError::Transport { source, .. }) if source.is_cancelled() => {
            debug!(target: CLIENT_TARGET, %operation, "request cancelled");
            Ok(None)
        }
        Err(ClientError::Transport { source, .. }) => {
            warn!(
                target: CLIENT_TARGET,
                %operation,
                error = %source,
                "request failed; showing no result"
            );
            Ok(None)
        }
        other => other,
    }
}
