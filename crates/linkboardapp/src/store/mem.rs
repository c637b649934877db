use super::{LocalCache, RemoteContainer, RemoteFile, RemoteStore, SyncTarget};
use crate::error::{LinkboardError, Result};
use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory local cache for testing.
///
/// `RefCell` is enough: the cache is only touched from the owning thread.
#[derive(Default)]
pub struct MemCache {
    snapshot: RefCell<Option<String>>,
    reads: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        let cache = Self::new();
        *cache.snapshot.borrow_mut() = Some(snapshot.into());
        cache
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn snapshot(&self) -> Option<String> {
        self.snapshot.borrow().clone()
    }

    /// How many times the cache has been read.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl LocalCache for MemCache {
    fn read(&self) -> Result<Option<String>> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.snapshot.borrow().clone())
    }

    fn write(&self, snapshot: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(LinkboardError::Store("Simulated write error".to_string()));
        }
        *self.snapshot.borrow_mut() = Some(snapshot.to_string());
        Ok(())
    }
}

/// In-memory remote for testing. Shared with sync threads, so it locks.
#[derive(Default)]
pub struct MemRemote {
    container: Mutex<Option<RemoteContainer>>,
    fail: AtomicBool,
    fetches: AtomicUsize,
    writes: AtomicUsize,
}

impl MemRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(container: RemoteContainer) -> Self {
        let remote = Self::new();
        remote.set_container(Some(container));
        remote
    }

    pub fn set_container(&self, container: Option<RemoteContainer>) {
        if let Ok(mut slot) = self.container.lock() {
            *slot = container;
        }
    }

    pub fn container(&self) -> Option<RemoteContainer> {
        self.container.lock().ok().and_then(|slot| slot.clone())
    }

    /// Makes every call fail like an unreachable remote.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self, target: &SyncTarget) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LinkboardError::Remote(format!(
                "Simulated failure for gist {}",
                target.gist_id
            )));
        }
        Ok(())
    }
}

impl RemoteStore for MemRemote {
    fn fetch(&self, target: &SyncTarget) -> Result<RemoteContainer> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check(target)?;
        self.container()
            .ok_or_else(|| LinkboardError::Remote(format!("Gist {} not found", target.gist_id)))
    }

    fn write_file(&self, target: &SyncTarget, file_name: &str, content: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check(target)?;
        let mut slot = self
            .container
            .lock()
            .map_err(|_| LinkboardError::Remote("Remote lock poisoned".to_string()))?;
        let container = slot.get_or_insert_with(RemoteContainer::default);
        match container.files.iter_mut().find(|f| f.name == file_name) {
            Some(file) => file.content = Some(content.to_string()),
            None => container.files.push(RemoteFile {
                name: file_name.to_string(),
                content: Some(content.to_string()),
            }),
        }
        Ok(())
    }
}
