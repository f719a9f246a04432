//! Store error kinds

use thiserror::Error;

/// Result type for document store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while talking to a content backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// Request failed or timed out
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body or document content could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// The revision sent with a write is stale
    #[error("revision conflict on {path}")]
    Conflict { path: String },

    /// Conflicts kept happening until the retry budget ran out
    #[error("gave up after {attempts} conflicting writes")]
    ExhaustedRetries { attempts: u32 },

    /// Any other unexpected status from the remote API
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

impl StoreError {
    /// Errors a lenient load collapses into the empty default
    pub fn is_collapsible(&self) -> bool {
        matches!(
            self,
            StoreError::Transport(_) | StoreError::Decode(_) | StoreError::Status { .. }
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}

impl From<base64::DecodeError> for StoreError {
    fn from(e: base64::DecodeError) -> Self {
        StoreError::Decode(e.to_string())
    }
}
