//! Wire formats of the remote search endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{domain::ResultRecord, error::TransportError};

/// Path of the search endpoint relative to the service root.
pub const SEARCH_PATH: &str = "search";

/// Body of a failed search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Extracts the `error` field of a failure body, if the body has one.
pub fn parse_error_body(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|body| body.error)
}

/// Decodes a successful response. The records are kept in the order the
/// service sent them. An `{ "error": ... }` object is surfaced as a server
/// message even when it arrives with a success status.
pub fn parse_results_body(body: &[u8]) -> Result<Vec<ResultRecord>, TransportError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| TransportError::Unparseable(format!("invalid JSON body: {err}")))?;

    match value {
        Value::Array(items) => Ok(items.into_iter().map(ResultRecord).collect()),
        Value::Object(ref map) => match map.get("error") {
            Some(Value::String(message)) => Err(TransportError::ServerMessage(message.clone())),
            _ => Err(TransportError::Unparseable(
                "expected a JSON array of records".to_string(),
            )),
        },
        _ => Err(TransportError::Unparseable(
            "expected a JSON array of records".to_string(),
        )),
    }
}

/// Maps a non-success response to the error shown to the user.
pub fn failure_from_body(status: u16, body: &[u8]) -> TransportError {
    match parse_error_body(body) {
        Some(message) => TransportError::ServerMessage(message),
        None => TransportError::Unparseable(format!("status {status} without an error body")),
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
