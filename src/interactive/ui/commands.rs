use serde_json::Value;

use crate::orchestrator::ApiRequest;

/// Side effects requested by a state update, executed by the app shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    None,
    /// Hand a wire request to the worker thread.
    Dispatch(ApiRequest),
    /// Best-effort export of a success envelope.
    Export { stem: String, payload: Value },
}
