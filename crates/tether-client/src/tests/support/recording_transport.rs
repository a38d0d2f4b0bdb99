//! Scripted transport that records every request routed through it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::transport::{Transport, TransportError};

/// Answer returned for a method.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Answer with this result.
    Result(Value),
    /// Fail as if the server were busy.
    Busy,
    /// Fail as if the connection dropped.
    Disconnected,
    /// Fail with a JSON-RPC error.
    Rejected(i64, String),
}

impl ScriptedResponse {
    fn answer(&self) -> Result<Option<Value>, TransportError> {
        match self {
            Self::Result(Value::Null) => Ok(None),
            Self::Result(value) => Ok(Some(value.clone())),
            Self::Busy => Err(TransportError::Busy),
            Self::Disconnected => Err(TransportError::Disconnected),
            Self::Rejected(code, message) => Err(TransportError::Rejected {
                code: *code,
                message: message.clone(),
            }),
        }
    }
}

/// Request observed by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Method name.
    pub method: String,
    /// Encoded parameters.
    pub params: Value,
}

#[derive(Debug, Default)]
struct TransportState {
    responses: HashMap<String, ScriptedResponse>,
    requests: Vec<RecordedRequest>,
}

/// Test double standing in for the server connection.
///
/// Clones share state, so a test keeps one handle while the client owns
/// another. Unscripted methods answer `null`.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    shared: Arc<Mutex<TransportState>>,
}

impl RecordingTransport {
    /// Creates a transport with no scripted answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the answer for `method`, replacing any earlier one.
    pub fn respond(&self, method: &str, response: ScriptedResponse) {
        lock(&self.shared)
            .responses
            .insert(method.to_owned(), response);
    }

    /// Requests observed so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.shared).requests.clone()
    }

    /// Parameters of the most recent request for `method`.
    #[must_use]
    pub fn last_params(&self, method: &str) -> Option<Value> {
        lock(&self.shared)
            .requests
            .iter()
            .rev()
            .find(|request| request.method == method)
            .map(|request| request.params.clone())
    }
}

impl Transport for RecordingTransport {
    fn send_request(
        &mut self,
        method: &str,
        params: Value,
        cancel: &CancellationToken,
    ) -> Result<Option<Value>, TransportError> {
        let mut state = lock(&self.shared);
        state.requests.push(RecordedRequest {
            method: method.to_owned(),
            params,
        });
        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        state
            .responses
            .get(method)
            .map_or(Ok(None), ScriptedResponse::answer)
    }
}

fn lock(shared: &Mutex<TransportState>) -> MutexGuard<'_, TransportState> {
    shared.lock().unwrap_or_else(|poison| poison.into_inner())
}
