//! # Storage Layer
//!
//! Linkboard keeps one [`Collection`](crate::model::Collection) and several places
//! it can come from. [`layered::LayeredStore`] decides which one is authoritative and
//! pushes every change back out.
//!
//! ## Sources, In Priority Order
//!
//! 1. **Remote**: a GitHub Gist whose first file holds the whole collection. Only
//!    consulted when a [`SyncTarget`] (gist id + token) is configured.
//! 2. **Local cache**: the last snapshot written by this machine.
//! 3. **Seed**: read-only default content ([`seed::SeedSource`]).
//! 4. **Empty**: when even the seed is unreadable.
//!
//! The first source that yields a parseable collection wins. Nothing is merged across
//! sources, and a failing source is never an error for the caller: it is logged and
//! the next one is tried.
//!
//! ## Saving
//!
//! - The local cache is overwritten synchronously with the full snapshot.
//! - With a sync target, a background thread fetches the gist, picks its first file
//!   and overwrites it with the full, pretty-printed snapshot. Failures are logged.
//!   No retry, no queue, no rollback of the local write.
//!
//! Two pushes in flight race: whichever completes last wins on the remote,
//! regardless of which edit came last.
//!
//! ## Implementations
//!
//! - [`fs_cache::FsCache`]: `links.json` in the data directory, atomic writes.
//! - [`gist::GistRemote`]: the Gist REST API over blocking `reqwest`.
//! - [`mem::MemCache`], [`mem::MemRemote`]: in-memory fakes for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! └── links.json      # local cache, compact JSON
//! <config_dir>/
//! ├── linkboard.toml  # settings
//! └── sync.json       # gist id + token
//! ```

use crate::error::Result;
use std::fmt;

pub mod fs_cache;
pub mod gist;
pub mod layered;
pub mod mem;
pub mod seed;

/// File name used on the remote when the gist has no file yet.
pub const DEFAULT_REMOTE_FILE: &str = "links.json";

/// The local durable cache: a single slot holding the last saved snapshot.
pub trait LocalCache {
    /// `Ok(None)` when nothing has been cached yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the cached snapshot. MUST NOT leave a partially written snapshot.
    fn write(&self, snapshot: &str) -> Result<()>;
}

/// A remote document container (a gist) holding the serialized collection.
///
/// Called from background threads, hence `Send + Sync`.
pub trait RemoteStore: Send + Sync {
    /// Fetches the container's metadata and file contents.
    fn fetch(&self, target: &SyncTarget) -> Result<RemoteContainer>;

    /// Overwrites one named file of the container.
    fn write_file(&self, target: &SyncTarget, file_name: &str, content: &str) -> Result<()>;
}

/// Which gist to sync with, and the token to do it.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncTarget {
    pub gist_id: String,
    pub token: String,
}

impl SyncTarget {
    pub fn new(gist_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            gist_id: gist_id.into(),
            token: token.into(),
        }
    }
}

// Keeps the token out of logs.
impl fmt::Debug for SyncTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncTarget")
            .field("gist_id", &self.gist_id)
            .field("token", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteFile {
    pub name: String,
    pub content: Option<String>,
}

/// Files of a remote container, in the order the remote returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteContainer {
    pub files: Vec<RemoteFile>,
}

impl RemoteContainer {
    pub fn single(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            files: vec![RemoteFile {
                name: name.into(),
                content: Some(content.into()),
            }],
        }
    }

    pub fn first_file_name(&self) -> Option<&str> {
        self.files.first().map(|f| f.name.as_str())
    }

    /// Content of the first file, if it has any non-blank content.
    pub fn first_content(&self) -> Option<&str> {
        self.files
            .first()
            .and_then(|f| f.content.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}
