//! # API Facade
//!
//! [`LinkboardApi`] is the single entry point for every linkboard operation. It owns
//! the live [`Collection`], the [`LayeredStore`] behind it and the drag state, and
//! dispatches to the command layer.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the appropriate command function
//! - **Persists**: after a command reports `changed`, the collection is saved
//! - **Notifies**: subscribed listeners see the collection after every change
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: no stdout, no prompts, no 1-based index parsing
//!
//! ## Change Protocol
//!
//! ```text
//! command(&mut collection) ──► changed? ──no──► return result
//!                                 │
//!                                yes
//!                                 ▼
//!                   store.save(&collection)   (local write, remote push spawned)
//!                                 ▼
//!                         notify listeners
//!                                 ▼
//!              return result, or the local write error
//! ```
//!
//! A failed local write does not roll back the in-memory change.
//!
//! ## Background Pushes
//!
//! Each save with sync configured returns a [`SyncHandle`]. The API collects them
//! and, on every commit, joins and logs the ones that have already finished, so a
//! long-lived client only ever holds pushes still in flight.
//! [`LinkboardApi::wait_for_sync`] joins the rest. Short-lived clients (the CLI)
//! must call it before exiting or the push dies with the process.
//!
//! ## Generic Over Storage
//!
//! - Production: `LinkboardApi<FsCache, GistRemote>` via [`LinkboardApi::open`]
//! - Testing: `LinkboardApi<MemCache, MemRemote>`

use crate::commands::{self, sync::SyncAction, CmdMessage, CmdResult, LinkboardPaths};
use crate::config::{LinkboardConfig, SyncSettings};
use crate::error::Result;
use crate::model::Collection;
use crate::reorder::{DragItem, DragSession, DropMarker, PointerPosition};
use crate::store::fs_cache::FsCache;
use crate::store::gist::GistRemote;
use crate::store::layered::{LayeredStore, LoadSource, SyncHandle, SyncOutcome};
use crate::store::seed::SeedSource;
use crate::store::{LocalCache, RemoteStore};
use tracing::{debug, warn};

/// Called with the collection after every change and reload.
pub type Listener = Box<dyn FnMut(&Collection)>;

pub struct LinkboardApi<C: LocalCache, R: RemoteStore + 'static> {
    collection: Collection,
    store: LayeredStore<C, R>,
    paths: LinkboardPaths,
    default_color: String,
    drag: DragSession,
    pending: Vec<SyncHandle>,
    listeners: Vec<Listener>,
    source: LoadSource,
}

impl LinkboardApi<FsCache, GistRemote> {
    /// Wires the filesystem cache and the Gist remote from configuration, then loads.
    pub fn open(paths: LinkboardPaths, config: &LinkboardConfig) -> Result<Self> {
        let target = SyncSettings::load(&paths.config_dir)?.target();
        let store = LayeredStore::new(
            FsCache::new(&paths.data_dir),
            GistRemote::new(config.api_base.clone())?,
            SeedSource::from_config(config.seed_path.clone()),
        )
        .with_target(target);
        Ok(Self::new(store, paths, config.default_color.clone()))
    }
}

impl<C: LocalCache, R: RemoteStore + 'static> LinkboardApi<C, R> {
    /// Runs the layered load and takes ownership of the result.
    pub fn new(
        store: LayeredStore<C, R>,
        paths: LinkboardPaths,
        default_color: impl Into<String>,
    ) -> Self {
        let loaded = store.load();
        Self {
            collection: loaded.collection,
            store,
            paths,
            default_color: default_color.into(),
            drag: DragSession::new(),
            pending: Vec::new(),
            listeners: Vec::new(),
            source: loaded.source,
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn paths(&self) -> &LinkboardPaths {
        &self.paths
    }

    pub fn store(&self) -> &LayeredStore<C, R> {
        &self.store
    }

    /// Which layer the current collection was loaded from.
    pub fn load_source(&self) -> LoadSource {
        self.source
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Collection) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn add_section(&mut self, title: String) -> Result<CmdResult> {
        let result = commands::sections::add(&mut self.collection, title, &self.default_color);
        self.commit(result)
    }

    pub fn rename_section(&mut self, index: usize, title: String) -> Result<CmdResult> {
        let result = commands::sections::rename(&mut self.collection, index, title);
        self.commit(result)
    }

    pub fn delete_section(&mut self, index: usize) -> Result<CmdResult> {
        let result = commands::sections::delete(&mut self.collection, index);
        self.commit(result)
    }

    pub fn add_link(&mut self, section: usize, name: String, url: String) -> Result<CmdResult> {
        let result = commands::links::add(&mut self.collection, section, name, url);
        self.commit(result)
    }

    pub fn edit_link(
        &mut self,
        section: usize,
        index: usize,
        name: String,
        url: String,
    ) -> Result<CmdResult> {
        let result = commands::links::edit(&mut self.collection, section, index, name, url);
        self.commit(result)
    }

    pub fn delete_link(&mut self, section: usize, index: usize) -> Result<CmdResult> {
        let result = commands::links::delete(&mut self.collection, section, index);
        self.commit(result)
    }

    /// `dest` is the post-removal index.
    pub fn move_section(&mut self, src: usize, dest: usize) -> Result<CmdResult> {
        let result = commands::moves::move_section(&mut self.collection, src, dest);
        self.commit(result)
    }

    pub fn move_link(&mut self, section: usize, src: usize, dest: usize) -> Result<CmdResult> {
        let result = commands::moves::move_link(&mut self.collection, section, src, dest);
        self.commit(result)
    }

    pub fn begin_drag(&mut self, source: DragItem) {
        self.drag.begin(source);
    }

    pub fn drag_over(&mut self, target: DragItem, pointer: PointerPosition) -> Option<DropMarker> {
        self.drag.hover(&self.collection, target, pointer)
    }

    pub fn drag_marker(&self) -> Option<DropMarker> {
        self.drag.marker()
    }

    /// Resolves the drop against the live collection and applies the move, if any.
    /// The drag stays active until [`end_drag`](Self::end_drag).
    pub fn drop_on(&mut self, target: DragItem, pointer: PointerPosition) -> Result<CmdResult> {
        match self.drag.drop(&self.collection, target, pointer) {
            Some(planned) => {
                debug!(?planned, "applying drop");
                let result = commands::moves::apply(&mut self.collection, planned);
                self.commit(result)
            }
            None => Ok(CmdResult::noop("Nothing to move")),
        }
    }

    pub fn end_drag(&mut self) {
        self.drag.end();
    }

    pub fn list(&self) -> CmdResult {
        commands::list::run(&self.collection)
    }

    pub fn find_section(&self, id: &str) -> CmdResult {
        commands::list::find(&self.collection, id)
    }

    /// Replaces the live collection with a fresh layered load.
    pub fn reload(&mut self) -> CmdResult {
        let loaded = self.store.load();
        self.collection = loaded.collection;
        self.source = loaded.source;
        self.drag.end();
        self.notify();
        commands::list::run(&self.collection)
            .with_message(CmdMessage::info(format!("Loaded from {}", self.source)))
    }

    /// Compact serialized collection, as written to the local cache.
    pub fn snapshot(&self) -> Result<String> {
        self.collection.to_snapshot()
    }

    /// Shows or changes the sync settings. A changed target takes effect immediately
    /// and triggers a reload.
    pub fn sync(&mut self, action: SyncAction) -> Result<CmdResult> {
        let mut result = commands::sync::run(&self.paths, action)?;
        let target = result.sync_settings.as_ref().and_then(SyncSettings::target);
        if self.store.target() != target.as_ref() {
            self.store.set_target(target);
            let reloaded = self.reload();
            result.messages.extend(reloaded.messages);
        }
        Ok(result)
    }

    /// Joins every push not yet reaped by a later commit.
    pub fn wait_for_sync(&mut self) -> Vec<SyncOutcome> {
        self.pending.drain(..).map(SyncHandle::wait).collect()
    }

    /// Joins finished pushes and logs their outcome.
    fn reap_finished(&mut self) {
        let (done, live): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(SyncHandle::is_finished);
        self.pending = live;
        for handle in done {
            match handle.wait() {
                SyncOutcome::Pushed { seq, file_name } => {
                    debug!(seq, file = %file_name, "sync complete");
                }
                SyncOutcome::Failed { seq, reason } => {
                    warn!(seq, %reason, "sync failed");
                }
            }
        }
    }

    fn commit(&mut self, result: CmdResult) -> Result<CmdResult> {
        if !result.changed {
            return Ok(result);
        }
        self.reap_finished();
        let saved = self.store.save(&self.collection);
        self.notify();
        if let Some(handle) = saved? {
            self.pending.push(handle);
        }
        Ok(result)
    }

    fn notify(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener(&self.collection);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, Section};
    use crate::store::mem::{MemCache, MemRemote};
    use crate::store::{RemoteContainer, SyncTarget};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::thread;
    use std::time::Duration;
    use tempfile::{tempdir, TempDir};

    fn paths(temp: &TempDir) -> LinkboardPaths {
        LinkboardPaths {
            data_dir: temp.path().join("data"),
            config_dir: temp.path().join("config"),
        }
    }

    fn api_with(
        temp: &TempDir,
        cache: MemCache,
        remote: MemRemote,
        target: Option<SyncTarget>,
    ) -> LinkboardApi<MemCache, MemRemote> {
        let store = LayeredStore::new(cache, remote, SeedSource::Inline("[]".into()))
            .with_target(target);
        LinkboardApi::new(store, paths(temp), "cyan")
    }

    fn empty_api(temp: &TempDir) -> LinkboardApi<MemCache, MemRemote> {
        api_with(temp, MemCache::new(), MemRemote::new(), None)
    }

    fn titles(api: &LinkboardApi<MemCache, MemRemote>) -> Vec<String> {
        api.collection()
            .sections()
            .iter()
            .map(|s| s.title.clone())
            .collect()
    }

    fn counter(api: &mut LinkboardApi<MemCache, MemRemote>) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        api.subscribe(move |_| seen.set(seen.get() + 1));
        count
    }

    #[test]
    fn changes_are_saved_and_notified() {
        let temp = tempdir().unwrap();
        let mut api = empty_api(&temp);
        let notified = counter(&mut api);

        api.add_section("Work".into()).unwrap();
        api.add_link(0, "Mail".into(), "https://mail.example.com".into())
            .unwrap();

        assert_eq!(notified.get(), 2);
        let cached = api.store().cache().snapshot().unwrap();
        assert_eq!(cached, api.snapshot().unwrap());
        assert_eq!(api.collection().section(0).unwrap().color, "cyan");
    }

    #[test]
    fn noops_do_not_save_or_notify() {
        let temp = tempdir().unwrap();
        let mut api = empty_api(&temp);
        api.add_section("Work".into()).unwrap();
        let notified = counter(&mut api);
        let before = api.store().cache().snapshot();

        let result = api.delete_section(5).unwrap();
        assert!(!result.changed);
        api.rename_section(3, "X".into()).unwrap();
        api.move_section(0, 0).unwrap();
        api.edit_link(0, 0, "a".into(), "b".into()).unwrap();

        assert_eq!(notified.get(), 0);
        assert_eq!(api.store().cache().snapshot(), before);
    }

    #[test]
    fn local_write_failure_keeps_change_and_notifies() {
        let temp = tempdir().unwrap();
        let mut api = empty_api(&temp);
        let notified = counter(&mut api);
        api.store().cache().set_simulate_write_error(true);

        assert!(api.add_section("Work".into()).is_err());
        assert_eq!(titles(&api), vec!["Work"]);
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn drag_below_last_section_moves_to_end() {
        let temp = tempdir().unwrap();
        let mut api = empty_api(&temp);
        for title in ["A", "B", "C"] {
            api.add_section(title.into()).unwrap();
        }

        api.begin_drag(DragItem::Section { index: 0 });
        let marker = api
            .drag_over(DragItem::Section { index: 2 }, PointerPosition::below())
            .unwrap();
        assert_eq!(marker.zone, crate::reorder::DropZone::Below);

        let result = api
            .drop_on(DragItem::Section { index: 2 }, PointerPosition::below())
            .unwrap();
        assert!(result.changed);
        assert!(api.drag_marker().is_none());
        api.end_drag();

        assert_eq!(titles(&api), vec!["B", "C", "A"]);
    }

    #[test]
    fn self_drop_leaves_snapshot_identical() {
        let temp = tempdir().unwrap();
        let mut api = empty_api(&temp);
        for title in ["A", "B"] {
            api.add_section(title.into()).unwrap();
        }
        let before = api.snapshot().unwrap();
        let notified = counter(&mut api);

        api.begin_drag(DragItem::Section { index: 1 });
        let result = api
            .drop_on(DragItem::Section { index: 1 }, PointerPosition::below())
            .unwrap();
        api.end_drag();

        assert!(!result.changed);
        assert_eq!(api.snapshot().unwrap(), before);
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn new_link_moved_to_top() {
        let temp = tempdir().unwrap();
        let cache = MemCache::with_snapshot(
            Collection::from(vec![
                Section::new("s", "S", "cyan").with_links(vec![Link::new("X", "http://x")])
            ])
            .to_snapshot()
            .unwrap(),
        );
        let mut api = api_with(&temp, cache, MemRemote::new(), None);

        api.add_link(0, "Y".into(), "http://y".into()).unwrap();
        api.begin_drag(DragItem::Link {
            section: 0,
            index: 1,
        });
        api.drop_on(
            DragItem::Link {
                section: 0,
                index: 0,
            },
            PointerPosition::above(),
        )
        .unwrap();
        api.end_drag();

        let names: Vec<_> = api.collection().section(0).unwrap().links
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["Y", "X"]);
    }

    #[test]
    fn remote_load_and_push() {
        let temp = tempdir().unwrap();
        let remote = MemRemote::with_container(RemoteContainer::single(
            "board.json",
            r#"[{"id":"r","title":"Remote"}]"#,
        ));
        let mut api = api_with(
            &temp,
            MemCache::new(),
            remote,
            Some(SyncTarget::new("g", "t")),
        );
        assert_eq!(api.load_source(), LoadSource::Remote);

        api.rename_section(0, "Renamed".into()).unwrap();
        let outcomes = api.wait_for_sync();
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], SyncOutcome::Pushed { .. }));

        let pushed = api.store().remote().container().unwrap();
        assert!(pushed.files[0].content.as_deref().unwrap().contains("Renamed"));
        assert!(api.wait_for_sync().is_empty());
    }

    #[test]
    fn finished_pushes_are_released_on_commit() {
        let temp = tempdir().unwrap();
        let remote = MemRemote::with_container(RemoteContainer::single("links.json", "[]"));
        let mut api = api_with(
            &temp,
            MemCache::new(),
            remote,
            Some(SyncTarget::new("g", "t")),
        );

        for i in 0..50 {
            api.add_section(format!("S{}", i)).unwrap();
            assert_eq!(api.pending.len(), 1);
            while !api.pending.iter().all(SyncHandle::is_finished) {
                thread::sleep(Duration::from_millis(1));
            }
        }

        assert_eq!(api.store().remote().writes(), 50);
        let outcomes = api.wait_for_sync();
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], SyncOutcome::Pushed { seq: 50, .. }));
    }

    #[test]
    fn setting_sync_reloads_from_remote() {
        let temp = tempdir().unwrap();
        let remote = MemRemote::with_container(RemoteContainer::single(
            "links.json",
            r#"[{"id":"r","title":"Remote"}]"#,
        ));
        let mut api = api_with(&temp, MemCache::new(), remote, None);
        assert_eq!(api.load_source(), LoadSource::Seed);
        let notified = counter(&mut api);

        let result = api
            .sync(SyncAction::Set {
                gist_id: "g".into(),
                token: "t".into(),
            })
            .unwrap();
        assert_eq!(api.load_source(), LoadSource::Remote);
        assert_eq!(titles(&api), vec!["Remote"]);
        assert_eq!(notified.get(), 1);
        assert!(result.messages.iter().any(|m| m.content.contains("remote")));

        api.sync(SyncAction::Clear).unwrap();
        assert!(api.store().target().is_none());
        assert_eq!(api.load_source(), LoadSource::Seed);
    }

    #[test]
    fn show_does_not_reload() {
        let temp = tempdir().unwrap();
        let mut api = empty_api(&temp);
        let notified = counter(&mut api);
        api.sync(SyncAction::Show).unwrap();
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn find_section_by_id() {
        let temp = tempdir().unwrap();
        let mut api = empty_api(&temp);
        api.add_section("A".into()).unwrap();
        api.add_section("B".into()).unwrap();
        let id = api.collection().section(1).unwrap().id.clone();

        let found = api.find_section(&id);
        assert_eq!(found.listed_sections[0].index, 1);
        assert!(api.find_section("nope").listed_sections.is_empty());
        assert_eq!(api.list().listed_sections.len(), 2);
    }
}
