//! Remote content API contract

use async_trait::async_trait;

use super::error::StoreResult;

/// A document as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDocument {
    /// Decoded JSON bytes
    pub content: Vec<u8>,
    /// Opaque version stamp of this content
    pub revision: String,
}

/// A compare-and-swap write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRequest {
    pub message: String,
    /// JSON bytes to store
    pub content: Vec<u8>,
    /// Revision the write is based on; `None` creates the document
    pub revision: Option<String>,
}

/// Versioned content storage keyed by path.
///
/// Implementations must report a stale `revision` as `StoreError::Conflict`.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Fetch a document; `Ok(None)` when it does not exist
    async fn fetch(&self, path: &str) -> StoreResult<Option<RemoteDocument>>;

    /// Write a document and return its new revision
    async fn put(&self, path: &str, request: PutRequest) -> StoreResult<String>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}
