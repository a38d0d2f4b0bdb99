//! Shared fixtures and helpers for client tests.

mod log_buffer;
mod recording_editor;
mod recording_transport;
mod world;

use std::str::FromStr;

use lsp_types::{
    CodeActionContext, CodeActionParams, HoverParams, PartialResultParams, Position, Range,
    TextDocumentIdentifier, TextDocumentPositionParams, Uri, WorkDoneProgressParams,
};
use rstest::fixture;

pub use log_buffer::LogBuffer;
pub use recording_transport::ScriptedResponse;
pub use world::TestWorld;

/// Common URI used by client tests.
#[fixture]
pub fn sample_uri() -> Uri {
    Uri::from_str("file:///workspace/main.rs").expect("invalid test URI")
}

/// Builds a code-action request covering the first line of the sample URI.
#[fixture]
pub fn code_action_params() -> CodeActionParams {
    CodeActionParams {
        text_document: TextDocumentIdentifier { uri: sample_uri() },
        range: Range::new(Position::new(0, 0), Position::new(0, 12)),
        context: CodeActionContext::default(),
        work_done_progress_params: WorkDoneProgressParams::default(),
        partial_result_params: PartialResultParams::default(),
    }
}

/// Builds a hover request for the sample URI.
#[fixture]
pub fn hover_params() -> HoverParams {
    HoverParams {
        text_document_position_params: TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri: sample_uri() },
            position: Position::new(1, 4),
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
    }
}
