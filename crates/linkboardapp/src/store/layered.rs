use super::seed::SeedSource;
use super::{LocalCache, RemoteStore, SyncTarget, DEFAULT_REMOTE_FILE};
use crate::error::Result;
use crate::model::Collection;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Where the loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Cache,
    Seed,
    Empty,
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadSource::Remote => "remote gist",
            LoadSource::Cache => "local cache",
            LoadSource::Seed => "seed",
            LoadSource::Empty => "empty",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct Loaded {
    pub collection: Collection,
    pub source: LoadSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Pushed { seq: u64, file_name: String },
    Failed { seq: u64, reason: String },
}

/// A remote push running in the background.
pub struct SyncHandle {
    seq: u64,
    handle: JoinHandle<SyncOutcome>,
}

impl SyncHandle {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the push completes.
    pub fn wait(self) -> SyncOutcome {
        let seq = self.seq;
        self.handle.join().unwrap_or_else(|_| SyncOutcome::Failed {
            seq,
            reason: "sync thread panicked".to_string(),
        })
    }
}

/// Resolves the authoritative collection at load time and fans saves out to the
/// local cache and, when configured, the remote.
pub struct LayeredStore<C: LocalCache, R: RemoteStore> {
    cache: C,
    remote: Arc<R>,
    seed: SeedSource,
    target: Option<SyncTarget>,
    save_seq: u64,
}

impl<C: LocalCache, R: RemoteStore + 'static> LayeredStore<C, R> {
    pub fn new(cache: C, remote: R, seed: SeedSource) -> Self {
        Self {
            cache,
            remote: Arc::new(remote),
            seed,
            target: None,
            save_seq: 0,
        }
    }

    pub fn with_target(mut self, target: Option<SyncTarget>) -> Self {
        self.target = target;
        self
    }

    /// Takes effect for the next load or save; in-flight pushes keep their target.
    pub fn set_target(&mut self, target: Option<SyncTarget>) {
        self.target = target;
    }

    pub fn target(&self) -> Option<&SyncTarget> {
        self.target.as_ref()
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// First source that yields a collection wins. Never fails.
    pub fn load(&self) -> Loaded {
        if let Some(target) = &self.target {
            if let Some(collection) = self.load_remote(target) {
                info!(sections = collection.len(), "loaded from remote gist");
                return Loaded {
                    collection,
                    source: LoadSource::Remote,
                };
            }
        }

        if let Some(collection) = self.load_cache() {
            info!(sections = collection.len(), "loaded from local cache");
            return Loaded {
                collection,
                source: LoadSource::Cache,
            };
        }

        match self.seed.read() {
            Ok(collection) => {
                info!(sections = collection.len(), "loaded seed");
                Loaded {
                    collection,
                    source: LoadSource::Seed,
                }
            }
            Err(e) => {
                info!(error = %e, "could not load seed, starting empty");
                Loaded {
                    collection: Collection::new(),
                    source: LoadSource::Empty,
                }
            }
        }
    }

    fn load_remote(&self, target: &SyncTarget) -> Option<Collection> {
        let container = match self.remote.fetch(target) {
            Ok(container) => container,
            Err(e) => {
                warn!(error = %e, "could not load from remote");
                return None;
            }
        };
        let Some(content) = container.first_content() else {
            info!("remote document is empty, falling back to other sources");
            return None;
        };
        match Collection::from_snapshot(content) {
            Ok(collection) => Some(collection),
            Err(e) => {
                warn!(error = %e, "remote document is not a valid collection");
                None
            }
        }
    }

    fn load_cache(&self) -> Option<Collection> {
        let snapshot = match self.cache.read() {
            Ok(Some(snapshot)) if !snapshot.trim().is_empty() => snapshot,
            Ok(_) => {
                debug!("local cache is empty");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "could not read local cache");
                return None;
            }
        };
        match Collection::from_snapshot(&snapshot) {
            Ok(collection) => Some(collection),
            Err(e) => {
                warn!(error = %e, "local cache is not a valid collection");
                None
            }
        }
    }

    /// Writes the local cache, then starts a remote push if sync is configured.
    ///
    /// Only the local write can fail the call. The returned handle may be dropped;
    /// the push keeps running.
    pub fn save(&mut self, collection: &Collection) -> Result<Option<SyncHandle>> {
        self.save_seq += 1;
        let seq = self.save_seq;

        self.cache.write(&collection.to_snapshot()?)?;
        debug!(seq, "local cache written");

        let Some(target) = self.target.clone() else {
            return Ok(None);
        };
        // Snapshot taken now; the push sends this even if later edits land first.
        let content = collection.to_pretty_snapshot()?;
        let remote = Arc::clone(&self.remote);

        let spawned = thread::Builder::new()
            .name(format!("linkboard-sync-{}", seq))
            .spawn(move || match push(remote.as_ref(), &target, &content) {
                Ok(file_name) => {
                    info!(seq, file = %file_name, "saved to remote gist");
                    SyncOutcome::Pushed { seq, file_name }
                }
                Err(e) => {
                    warn!(seq, error = %e, "could not save to remote gist");
                    SyncOutcome::Failed {
                        seq,
                        reason: e.to_string(),
                    }
                }
            });

        match spawned {
            Ok(handle) => Ok(Some(SyncHandle { seq, handle })),
            Err(e) => {
                warn!(seq, error = %e, "could not start remote sync");
                Ok(None)
            }
        }
    }
}

fn push<R: RemoteStore + ?Sized>(remote: &R, target: &SyncTarget, content: &str) -> Result<String> {
    let container = remote.fetch(target)?;
    let file_name = container
        .first_file_name()
        .unwrap_or(DEFAULT_REMOTE_FILE)
        .to_string();
    remote.write_file(target, &file_name, content)?;
    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, Section};
    use crate::store::mem::{MemCache, MemRemote};
    use crate::store::RemoteContainer;

    const REMOTE: &str = r#"[{"id":"r","title":"Remote"}]"#;
    const CACHED: &str = r#"[{"id":"c","title":"Cached"}]"#;
    const SEED: &str = r#"[{"id":"s","title":"Seed"}]"#;

    fn target() -> Option<SyncTarget> {
        Some(SyncTarget::new("gist1", "tok"))
    }

    fn first_title(loaded: &Loaded) -> &str {
        &loaded.collection.section(0).unwrap().title
    }

    fn store(cache: MemCache, remote: MemRemote) -> LayeredStore<MemCache, MemRemote> {
        LayeredStore::new(cache, remote, SeedSource::Inline(SEED.to_string()))
    }

    #[test]
    fn remote_wins_and_cache_is_not_read() {
        let s = store(
            MemCache::with_snapshot(CACHED),
            MemRemote::with_container(RemoteContainer::single("links.json", REMOTE)),
        )
        .with_target(target());
        let loaded = s.load();
        assert_eq!(loaded.source, LoadSource::Remote);
        assert_eq!(first_title(&loaded), "Remote");
        assert_eq!(s.cache().reads(), 0);
    }

    #[test]
    fn remote_is_skipped_without_target() {
        let s = store(
            MemCache::with_snapshot(CACHED),
            MemRemote::with_container(RemoteContainer::single("links.json", REMOTE)),
        );
        let loaded = s.load();
        assert_eq!(loaded.source, LoadSource::Cache);
        assert_eq!(s.remote().fetches(), 0);
    }

    #[test]
    fn failing_remote_falls_back_to_cache() {
        let remote = MemRemote::with_container(RemoteContainer::single("links.json", REMOTE));
        remote.set_failing(true);
        let s = store(MemCache::with_snapshot(CACHED), remote).with_target(target());
        let loaded = s.load();
        assert_eq!(loaded.source, LoadSource::Cache);
        assert_eq!(first_title(&loaded), "Cached");
    }

    #[test]
    fn empty_or_malformed_remote_falls_back() {
        for content in ["", "   ", "{oops", "null"] {
            let s = store(
                MemCache::with_snapshot(CACHED),
                MemRemote::with_container(RemoteContainer::single("links.json", content)),
            )
            .with_target(target());
            assert_eq!(s.load().source, LoadSource::Cache, "content {:?}", content);
        }
    }

    #[test]
    fn empty_array_on_remote_is_valid_data() {
        let s = store(
            MemCache::with_snapshot(CACHED),
            MemRemote::with_container(RemoteContainer::single("links.json", "[]")),
        )
        .with_target(target());
        let loaded = s.load();
        assert_eq!(loaded.source, LoadSource::Remote);
        assert!(loaded.collection.is_empty());
    }

    #[test]
    fn seed_when_no_remote_and_no_cache() {
        let s = store(MemCache::new(), MemRemote::new()).with_target(target());
        let loaded = s.load();
        assert_eq!(loaded.source, LoadSource::Seed);
        assert_eq!(first_title(&loaded), "Seed");
    }

    #[test]
    fn malformed_cache_falls_back_to_seed() {
        let s = store(MemCache::with_snapshot("[{"), MemRemote::new());
        assert_eq!(s.load().source, LoadSource::Seed);
    }

    #[test]
    fn unreadable_seed_gives_empty() {
        let s = LayeredStore::new(
            MemCache::new(),
            MemRemote::new(),
            SeedSource::Inline("garbage".into()),
        );
        let loaded = s.load();
        assert_eq!(loaded.source, LoadSource::Empty);
        assert!(loaded.collection.is_empty());
    }

    #[test]
    fn save_without_target_only_writes_cache() {
        let mut s = store(MemCache::new(), MemRemote::new());
        let c = Collection::from(vec![Section::new("a", "A", "cyan")]);
        let handle = s.save(&c).unwrap();
        assert!(handle.is_none());
        assert_eq!(s.cache().snapshot().unwrap(), c.to_snapshot().unwrap());
        assert_eq!(s.remote().writes(), 0);
    }

    #[test]
    fn save_pushes_pretty_snapshot_to_first_file() {
        let remote = MemRemote::with_container(RemoteContainer::single("mine.json", REMOTE));
        let mut s = store(MemCache::new(), remote).with_target(target());
        let c = Collection::from(vec![
            Section::new("a", "A", "cyan").with_links(vec![Link::new("X", "http://x")])
        ]);

        let outcome = s.save(&c).unwrap().unwrap().wait();
        assert_eq!(
            outcome,
            SyncOutcome::Pushed {
                seq: 1,
                file_name: "mine.json".into()
            }
        );
        let pushed = s.remote().container().unwrap();
        assert_eq!(pushed.files.len(), 1);
        assert_eq!(
            pushed.files[0].content.as_deref(),
            Some(c.to_pretty_snapshot().unwrap().as_str())
        );
    }

    #[test]
    fn save_to_gist_without_files_uses_default_name() {
        let remote = MemRemote::with_container(RemoteContainer::default());
        let mut s = store(MemCache::new(), remote).with_target(target());
        let outcome = s.save(&Collection::new()).unwrap().unwrap().wait();
        assert!(matches!(outcome, SyncOutcome::Pushed { ref file_name, .. } if file_name == DEFAULT_REMOTE_FILE));
    }

    #[test]
    fn failed_push_keeps_local_write() {
        let remote = MemRemote::new();
        remote.set_failing(true);
        let mut s = store(MemCache::new(), remote).with_target(target());
        let c = Collection::from(vec![Section::new("a", "A", "cyan")]);

        let outcome = s.save(&c).unwrap().unwrap().wait();
        assert!(matches!(outcome, SyncOutcome::Failed { seq: 1, .. }));
        assert!(s.cache().snapshot().is_some());
    }

    #[test]
    fn local_write_failure_is_returned() {
        let cache = MemCache::new();
        cache.set_simulate_write_error(true);
        let mut s = store(cache, MemRemote::new()).with_target(target());
        assert!(s.save(&Collection::new()).is_err());
        assert_eq!(s.remote().fetches(), 0);
    }

    #[test]
    fn sequence_numbers_increase() {
        let mut s = store(MemCache::new(), MemRemote::new()).with_target(target());
        let first = s.save(&Collection::new()).unwrap().unwrap();
        let second = s.save(&Collection::new()).unwrap().unwrap();
        assert!(second.seq() > first.seq());
        first.wait();
        second.wait();
    }
}
