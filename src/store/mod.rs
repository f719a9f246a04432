//! Optimistic-concurrency document store
//!
//! A `DocumentStore<D>` owns one JSON document at one path of a
//! `ContentBackend`. Reads return the document together with its revision;
//! writes send that revision back as a compare-and-swap precondition. On a
//! conflict the store reloads, lets the caller re-apply the fields it owns,
//! and tries again until the retry budget runs out.
//!
//! # Absent vs. unreadable
//!
//! `load` returns the empty default both when the document does not exist and
//! when it could not be fetched or decoded. A save after such a load can
//! overwrite real history if the backend accepts it. `try_load` keeps the two
//! apart, and `LoadMode::Strict` makes `load_checked` fail instead of
//! collapsing.

mod backend;
mod error;
pub mod github;
pub mod in_memory;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use backend::{ContentBackend, PutRequest, RemoteDocument};
pub use error::{StoreError, StoreResult};
pub use github::{GitHubBackend, GitHubSettings};
pub use in_memory::MemoryBackend;

/// One reload-and-retry on conflict
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// A checked-out document and the revision it was read at
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<D> {
    pub document: D,
    /// `None` means the document does not exist yet
    pub revision: Option<String>,
}

impl<D: Default> Versioned<D> {
    /// Empty default document, not yet created remotely
    pub fn absent() -> Self {
        Self {
            document: D::default(),
            revision: None,
        }
    }
}

/// How `load_checked` treats fetch and decode failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Collapse failures into the empty default
    #[default]
    Lenient,
    /// Propagate failures to the caller
    Strict,
}

/// Read-modify-write wrapper for one remote JSON document
pub struct DocumentStore<D> {
    backend: Arc<dyn ContentBackend>,
    path: String,
    mode: LoadMode,
    retry_backoff: Duration,
    _document: std::marker::PhantomData<fn() -> D>,
}

impl<D> DocumentStore<D>
where
    D: Serialize + DeserializeOwned + Default + Clone + Send + Sync,
{
    pub fn new(backend: Arc<dyn ContentBackend>, path: impl Into<String>) -> Self {
        Self {
            backend,
            path: path.into(),
            mode: LoadMode::default(),
            retry_backoff: Duration::ZERO,
            _document: std::marker::PhantomData,
        }
    }

    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sleep between a conflict and the reload
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Fetch and decode, keeping "absent" apart from "unreadable"
    pub async fn try_load(&self) -> StoreResult<Versioned<D>> {
        let Some(remote) = self.backend.fetch(&self.path).await? else {
            log::info!("{} not found on {}, starting empty", self.path, self.backend.name());
            return Ok(Versioned::absent());
        };

        let document: D = serde_json::from_slice(&remote.content)?;
        log::debug!("loaded {} at revision {}", self.path, remote.revision);
        Ok(Versioned {
            document,
            revision: Some(remote.revision),
        })
    }

    /// Fetch and decode; any failure yields the empty default
    pub async fn load(&self) -> Versioned<D> {
        match self.try_load().await {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("failed to load {}, using empty default: {}", self.path, e);
                Versioned::absent()
            }
        }
    }

    /// Load honouring the store's `LoadMode`
    pub async fn load_checked(&self) -> StoreResult<Versioned<D>> {
        match self.mode {
            LoadMode::Lenient => Ok(self.load().await),
            LoadMode::Strict => self.try_load().await,
        }
    }

    /// Compare-and-swap write with bounded reload-merge-retry.
    ///
    /// `merge(fresh, ours)` must reapply this operation's change to `fresh`.
    /// A lenient load may have handed out an empty default in place of an
    /// unreadable document, so whole fields of `ours` are not safe to copy.
    /// On success `doc` holds what was written and its new revision.
    pub async fn try_save<M>(
        &self,
        doc: &mut Versioned<D>,
        max_retries: u32,
        message: &str,
        merge: M,
    ) -> StoreResult<()>
    where
        M: Fn(&mut D, &D),
    {
        let mut retries_left = max_retries;
        let mut attempts = 0;

        loop {
            attempts += 1;
            let content = serde_json::to_vec_pretty(&doc.document)?;
            let request = PutRequest {
                message: message.to_string(),
                content,
                revision: doc.revision.clone(),
            };

            match self.backend.put(&self.path, request).await {
                Ok(revision) => {
                    log::info!("saved {} at revision {}", self.path, revision);
                    doc.revision = Some(revision);
                    return Ok(());
                }
                Err(e) if e.is_conflict() && retries_left > 0 => {
                    retries_left -= 1;
                    log::warn!(
                        "revision conflict on {}, reloading ({} retries left)",
                        self.path,
                        retries_left
                    );
                    if !self.retry_backoff.is_zero() {
                        tokio::time::sleep(self.retry_backoff).await;
                    }

                    let mut fresh = self.load_checked().await?;
                    merge(&mut fresh.document, &doc.document);
                    *doc = fresh;
                }
                Err(e) if e.is_conflict() => {
                    return Err(StoreError::ExhaustedRetries { attempts });
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// `try_save` reduced to success or failure
    pub async fn save<M>(
        &self,
        doc: &mut Versioned<D>,
        max_retries: u32,
        message: &str,
        merge: M,
    ) -> bool
    where
        M: Fn(&mut D, &D),
    {
        match self.try_save(doc, max_retries, message, merge).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to save {}: {}", self.path, e);
                false
            }
        }
    }
}
