//! Editor double that records edits, picks and notifications.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use lsp_types::WorkspaceEdit;

use crate::editor::{EditorError, EditorHost};

#[derive(Debug, Default)]
struct EditorState {
    applied: Vec<WorkspaceEdit>,
    offered: Vec<Vec<String>>,
    choices: VecDeque<Option<usize>>,
    errors: Vec<String>,
    apply_failure: Option<String>,
}

/// Test double standing in for the editor.
///
/// Picks answer from a queue of scripted choices; an empty queue dismisses
/// the pick.
#[derive(Debug, Clone, Default)]
pub struct RecordingEditor {
    shared: Arc<Mutex<EditorState>>,
}

impl RecordingEditor {
    /// Creates an editor with no scripted picks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer for the next pick.
    pub fn choose(&self, choice: Option<usize>) {
        lock(&self.shared).choices.push_back(choice);
    }

    /// Makes every later edit fail with `message`.
    pub fn fail_edits(&self, message: &str) {
        lock(&self.shared).apply_failure = Some(message.to_owned());
    }

    /// Edits applied so far.
    #[must_use]
    pub fn applied(&self) -> Vec<WorkspaceEdit> {
        lock(&self.shared).applied.clone()
    }

    /// Label lists offered through picks.
    #[must_use]
    pub fn offered(&self) -> Vec<Vec<String>> {
        lock(&self.shared).offered.clone()
    }

    /// Error notifications shown so far.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        lock(&self.shared).errors.clone()
    }
}

impl EditorHost for RecordingEditor {
    fn apply_workspace_edit(&mut self, edit: WorkspaceEdit) -> Result<(), EditorError> {
        let mut state = lock(&self.shared);
        if let Some(reason) = state.apply_failure.clone() {
            return Err(EditorError::with_source(
                "workspace edit rejected",
                io::Error::other(reason),
            ));
        }
        state.applied.push(edit);
        Ok(())
    }

    fn pick(&mut self, labels: &[String]) -> Option<usize> {
        let mut state = lock(&self.shared);
        state.offered.push(labels.to_vec());
        state.choices.pop_front().flatten()
    }

    fn show_error(&mut self, message: &str) {
        lock(&self.shared).errors.push(message.to_owned());
    }
}

fn lock(shared: &Mutex<EditorState>) -> MutexGuard<'_, EditorState> {
    shared.lock().unwrap_or_else(|poison| poison.into_inner())
}
