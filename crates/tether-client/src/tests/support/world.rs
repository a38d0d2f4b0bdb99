//! BDD test world encapsulating the client and its doubles.

use lsp_types::Command;
use serde_json::Value;
use tether_config::Config;
use tokio_util::sync::CancellationToken;

use crate::ActionClient;
use crate::display::{DisplayAction, EditorHover};
use crate::errors::ClientError;

use super::recording_editor::RecordingEditor;
use super::recording_transport::{RecordingTransport, ScriptedResponse};
use super::{code_action_params, hover_params};

/// Shared state exercised by BDD step implementations.
pub struct TestWorld {
    /// Handle onto the transport owned by the client.
    pub transport: RecordingTransport,
    /// Handle onto the editor owned by the client.
    pub editor: RecordingEditor,
    /// Client under test.
    pub client: ActionClient,
    /// Last display actions observed.
    pub last_actions: Option<Vec<DisplayAction>>,
    /// Last hover observed.
    pub last_hover: Option<EditorHover>,
    /// Whether the last command applied an edit.
    pub last_applied: Option<bool>,
    /// Last error observed while exercising the client.
    pub last_error: Option<ClientError>,
}

impl TestWorld {
    /// Builds a world around `config` with fresh doubles.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let transport = RecordingTransport::new();
        let editor = RecordingEditor::new();
        let client = ActionClient::new(
            Box::new(transport.clone()),
            Box::new(editor.clone()),
            &config,
        );
        Self {
            transport,
            editor,
            client,
            last_actions: None,
            last_hover: None,
            last_applied: None,
            last_error: None,
        }
    }

    /// Scripts the server's answer for `method`.
    pub fn respond(&self, method: &str, result: Value) {
        self.transport
            .respond(method, ScriptedResponse::Result(result));
    }

    /// Requests code actions for the sample document.
    pub fn request_code_actions(&mut self) {
        match self
            .client
            .code_actions(&code_action_params(), &CancellationToken::new())
        {
            Ok(actions) => self.last_actions = actions,
            Err(error) => self.last_error = Some(error),
        }
    }

    /// Requests a hover for the sample document.
    pub fn request_hover(&mut self) {
        match self
            .client
            .hover(&hover_params(), &CancellationToken::new())
        {
            Ok(hover) => self.last_hover = hover,
            Err(error) => self.last_error = Some(error),
        }
    }

    /// Runs the command attached to the displayed action titled `title`.
    pub fn invoke(&mut self, title: &str) {
        let command = self.command_for(title);
        match self
            .client
            .execute_command(&command, &CancellationToken::new())
        {
            Ok(applied) => self.last_applied = Some(applied),
            Err(error) => self.last_error = Some(error),
        }
    }

    /// Titles of the last display actions, in order.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.last_actions
            .iter()
            .flatten()
            .map(|action| action.title.clone())
            .collect()
    }

    fn command_for(&self, title: &str) -> Command {
        self.last_actions
            .iter()
            .flatten()
            .find(|action| action.title == title)
            .and_then(|action| action.command.clone())
            .unwrap_or_else(|| panic!("no displayed action titled '{title}' with a command"))
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
