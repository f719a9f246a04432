//! Response builders for the bridge protocol

use serde::Serialize;
use serde_json::Value;

use crate::bot::CommandError;
use crate::commands::Reply;

/// Error kind for lines that are not JSON
pub const PARSE_ERROR: &str = "parse_error";

/// Error kind for JSON that is not a valid invocation
pub const INVALID_REQUEST: &str = "invalid_request";

/// One output line
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BridgeResponse {
    pub id: Value,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<Reply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BridgeError>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BridgeError {
    pub kind: String,
    pub message: String,
}

impl BridgeResponse {
    pub fn success(id: Value, reply: Reply) -> Self {
        Self {
            id,
            ok: true,
            reply: Some(reply),
            error: None,
        }
    }

    pub fn failure(id: Value, kind: &str, message: impl Into<String>) -> Self {
        Self {
            id,
            ok: false,
            reply: None,
            error: Some(BridgeError {
                kind: kind.to_string(),
                message: message.into(),
            }),
        }
    }

    /// Map a command error onto its stable kind and user-facing message
    pub fn from_command_error(id: Value, err: &CommandError) -> Self {
        Self::failure(id, err.kind(), err.to_string())
    }
}
