//! Seam between the client and whatever carries LSP messages to the server.

use std::fmt;

use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors reported by a [`Transport`] for a single request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a JSON-RPC error.
    #[error("request rejected by server: {message} (code: {code})")]
    Rejected {
        /// JSON-RPC error code.
        code: i64,
        /// Error message from the server.
        message: String,
    },

    /// The server reported that it cannot serve the request right now.
    #[error("language server is busy")]
    Busy,

    /// The request was abandoned through its cancellation token.
    #[error("request was cancelled")]
    Cancelled,

    /// The connection to the server is gone.
    #[error("connection to the language server is closed")]
    Disconnected,
}

impl TransportError {
    /// Whether the failure came from the caller abandoning the request.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Sends protocol requests and returns their raw results.
///
/// Implementations own framing, message correlation and the server process.
/// `Ok(None)` means the server answered with `null`. The cancellation token is
/// forwarded untouched so an abandoned request can be dropped upstream.
pub trait Transport: Send {
    /// Sends `method` with `params` and waits for its result.
    fn send_request(
        &mut self,
        method: &str,
        params: Value,
        cancel: &CancellationToken,
    ) -> Result<Option<Value>, TransportError>;
}

impl fmt::Debug for dyn Transport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Transport")
    }
}
