//! Process-local content backend
//!
//! Same CAS semantics as the remote API. Used for offline runs and tests;
//! the `write_external` hook plays the role of a concurrent editor.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::backend::{ContentBackend, PutRequest, RemoteDocument};
use super::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
struct StoredEntry {
    content: Vec<u8>,
    revision: String,
    message: String,
}

/// In-memory versioned content store
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, StoredEntry>>,
    revision_counter: AtomicU64,
    puts: AtomicU64,
    unavailable: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_revision(&self) -> String {
        let n = self.revision_counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("rev-{}", n)
    }

    /// Overwrite a document as an outside editor would, bumping its revision
    pub fn write_external(&self, path: &str, content: impl Into<Vec<u8>>) -> String {
        let revision = self.next_revision();
        self.entries.lock().insert(
            path.to_string(),
            StoredEntry {
                content: content.into(),
                revision: revision.clone(),
                message: "external edit".to_string(),
            },
        );
        revision
    }

    /// Stored bytes for a path
    pub fn raw(&self, path: &str) -> Option<Vec<u8>> {
        self.entries.lock().get(path).map(|e| e.content.clone())
    }

    /// Current revision for a path
    pub fn revision(&self, path: &str) -> Option<String> {
        self.entries.lock().get(path).map(|e| e.revision.clone())
    }

    /// Commit message of the last write to a path
    pub fn last_message(&self, path: &str) -> Option<String> {
        self.entries.lock().get(path).map(|e| e.message.clone())
    }

    /// Number of successful writes made through `put`
    pub fn put_count(&self) -> u64 {
        self.puts.load(Ordering::SeqCst)
    }

    /// Make every request fail with a 503 until switched back
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 503,
                body: "backend unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentBackend for MemoryBackend {
    async fn fetch(&self, path: &str) -> StoreResult<Option<RemoteDocument>> {
        self.check_available()?;
        Ok(self.entries.lock().get(path).map(|e| RemoteDocument {
            content: e.content.clone(),
            revision: e.revision.clone(),
        }))
    }

    async fn put(&self, path: &str, request: PutRequest) -> StoreResult<String> {
        self.check_available()?;
        let mut entries = self.entries.lock();

        let current = entries.get(path).map(|e| e.revision.as_str());
        if current != request.revision.as_deref() {
            return Err(StoreError::Conflict {
                path: path.to_string(),
            });
        }

        let revision = self.next_revision();
        entries.insert(
            path.to_string(),
            StoredEntry {
                content: request.content,
                revision: revision.clone(),
                message: request.message,
            },
        );
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(revision)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
