//! Seam between the client and the editor that displays its results.

use std::error::Error;
use std::fmt;

use lsp_types::WorkspaceEdit;
use thiserror::Error;

/// Error reported by an [`EditorHost`] while applying an edit.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EditorError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl EditorError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Editor-side operations the client calls back into.
pub trait EditorHost {
    /// Applies a resolved workspace edit to the open documents.
    fn apply_workspace_edit(&mut self, edit: WorkspaceEdit) -> Result<(), EditorError>;

    /// Offers `labels` to the user and returns the chosen index, if any.
    fn pick(&mut self, labels: &[String]) -> Option<usize>;

    /// Shows an error notification.
    fn show_error(&mut self, message: &str);
}

impl fmt::Debug for dyn EditorHost {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("EditorHost")
    }
}
