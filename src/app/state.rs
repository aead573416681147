//! Browser session state and main controller module for dirscope.
//!
//! [BrowserSession] holds everything one browsing view needs:
//! - Navigation state (browsed directory, back stack, view mode and snapshots)
//! - The sort engine and the currently displayed list
//! - The loading flag and the permission gate
//! - Communication with the listing worker via crossbeam_channel
//! - Subscribers observing [SessionEvent]s
//!
//! Listings are requested here, executed on the worker and published back through
//! [BrowserSession::tick] or [BrowserSession::wait_idle]. Only the response to the latest
//! request is published; anything older is dropped.

use crate::app::NavState;
use crate::config::Config;
use crate::core::entry::CompareRules;
use crate::core::error::SortError;
use crate::core::lister::DirectoryLister;
use crate::core::sort::{SortEngine, SortKey};
use crate::core::worker::{ListingSource, WorkerResponse, WorkerTask, Workers};
use crate::core::FileItem;

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Observable changes of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    FilesChanged(Arc<[FileItem]>),
    LoadingChanged(bool),
    /// The latest listing hit a permission failure at its root.
    PermissionDenied(PathBuf),
}

/// Construction options of a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub rules: CompareRules,
    pub initial_sort: SortKey,
    /// Start in updated-files mode.
    pub updated_view: bool,
    /// Permission is already granted, so the first listing is dispatched right away.
    pub permission_granted: bool,
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            rules: CompareRules::new(
                config.general().dirs_first(),
                config.general().case_insensitive(),
            ),
            ..Self::default()
        }
    }
}

/// One navigation session over a [DirectoryLister].
pub struct BrowserSession {
    nav: NavState,
    sorter: SortEngine,
    files: Vec<FileItem>,
    pending_sort: Option<SortKey>,
    is_loading: bool,
    permission_granted: bool,
    denied: Option<PathBuf>,
    workers: Workers,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl BrowserSession {
    /// Creates a session browsing `root`.
    ///
    /// No listing happens until permission is granted, either through `options` or
    /// [BrowserSession::grant_permission].
    pub fn new(root: PathBuf, lister: Arc<dyn DirectoryLister>, options: SessionOptions) -> Self {
        let mut nav = NavState::new(root);
        if options.updated_view {
            nav.toggle_mode(&[]);
        }

        let mut session = Self {
            nav,
            sorter: SortEngine::new(options.initial_sort, options.rules),
            files: Vec::new(),
            pending_sort: None,
            is_loading: false,
            permission_granted: options.permission_granted,
            denied: None,
            workers: Workers::spawn(lister),
            subscribers: Vec::new(),
        };

        session.request_current(Some(options.initial_sort));
        session
    }

    // Getters / accessors

    #[inline]
    pub fn current_files(&self) -> &[FileItem] {
        &self.files
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[inline]
    pub fn current_dir(&self) -> &Path {
        self.nav.current_dir()
    }

    #[inline]
    pub fn sort_key(&self) -> SortKey {
        self.sorter.current()
    }

    #[inline]
    pub fn showing_updated(&self) -> bool {
        self.nav.showing_updated()
    }

    #[inline]
    pub fn can_go_back(&self) -> bool {
        self.nav.can_go_back()
    }

    #[inline]
    pub fn permission_granted(&self) -> bool {
        self.permission_granted
    }

    /// Root of the latest listing when it failed on permissions.
    #[inline]
    pub fn denied_path(&self) -> Option<&Path> {
        self.denied.as_deref()
    }

    /// Registers an observer. Every later change is delivered to the returned receiver.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    // Boundary operations

    /// Signals that storage permission was granted and dispatches the deferred listing.
    pub fn grant_permission(&mut self) {
        if self.permission_granted {
            return;
        }
        log::info!("Storage permission granted");
        self.permission_granted = true;
        let sort = self.pending_sort;
        self.request_current(sort);
    }

    /// Lists `path` and orders the result by `sort`, or by the current key when `None`.
    pub fn request_listing(&mut self, path: PathBuf, sort: Option<SortKey>) {
        self.nav.set_path(path);
        self.request_current(sort);
    }

    /// Re-orders the displayed list synchronously.
    pub fn request_sort(&mut self, key: SortKey) {
        let pass = self.sorter.apply(&mut self.files, key);
        log::debug!("Sorted {} items by {} ({:?})", self.files.len(), key, pass);
        // An explicit sort supersedes the key requested with an in-flight listing
        self.pending_sort = None;
        self.publish_files();
    }

    /// Re-orders by selector position. Out-of-range positions are rejected without changes.
    pub fn request_sort_index(&mut self, index: usize) -> Result<(), SortError> {
        let key = SortKey::from_index(index)?;
        self.request_sort(key);
        Ok(())
    }

    /// Switches between all files and updated files.
    ///
    /// The snapshot of the mode being entered is shown immediately in the order it was
    /// captured; the current sort key is not reapplied to it. A fresh listing for the new
    /// mode is requested and is sorted by the current key when it arrives.
    pub fn toggle_view_mode(&mut self) {
        let shown = self.nav.toggle_mode(&self.files);
        self.files = shown;
        self.sorter.invalidate();
        log::debug!(
            "View mode switched, showing updated: {}",
            self.nav.showing_updated()
        );
        self.publish_files();
        self.request_current(None);
    }

    /// Moves into `child`, remembering the current directory for [BrowserSession::go_back].
    pub fn descend(&mut self, child: PathBuf) {
        self.nav.descend(child);
        self.request_current(None);
    }

    /// Returns to the previous directory.
    ///
    /// Returns `false` when there is nowhere to go back to; the caller should then fall
    /// through to its exit handling.
    pub fn go_back(&mut self) -> bool {
        if !self.nav.go_back() {
            return false;
        }
        self.request_current(None);
        true
    }

    // Worker handling

    /// Drains worker responses and publishes the latest listing.
    /// Returns true if any response was processed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        while let Ok(response) = self.workers.response_rx().try_recv() {
            changed = true;
            self.handle_response(response);
        }
        changed
    }

    /// Blocks until the latest listing has been published or `timeout` elapses.
    /// Returns true when the session is no longer loading.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_loading {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.workers.response_rx().recv_timeout(remaining) {
                Ok(response) => self.handle_response(response),
                Err(_) => return false,
            }
        }
        true
    }

    /// Requests a listing for the current directory and mode.
    fn request_current(&mut self, sort: Option<SortKey>) {
        self.pending_sort = sort;

        if !self.permission_granted {
            log::debug!(
                "Listing of {} deferred until permission is granted",
                self.nav.current_dir().display()
            );
            return;
        }

        let source = if self.nav.showing_updated() {
            ListingSource::Updated
        } else {
            ListingSource::Directory(self.nav.current_dir().to_path_buf())
        };

        self.set_loading(true);
        let request_id = self.nav.prepare_new_request();
        log::debug!("Requesting {:?} (request {})", source, request_id);

        if self
            .workers
            .io_tx()
            .send(WorkerTask::List { source, request_id })
            .is_err()
        {
            log::warn!("Listing worker is gone, request {} dropped", request_id);
            self.set_loading(false);
        }
    }

    fn handle_response(&mut self, response: WorkerResponse) {
        // only the latest request may publish
        if response.request_id() != self.nav.request_id() {
            log::debug!("Dropping stale response {}", response.request_id());
            return;
        }

        match response {
            WorkerResponse::Listed { items, .. } => {
                self.files = items;
                self.sorter.invalidate();
                let key = self.pending_sort.take().unwrap_or(self.sorter.current());
                self.sorter.apply(&mut self.files, key);
                self.denied = None;
                self.publish_files();
            }
            WorkerResponse::PermissionDenied { path, .. } => {
                self.files.clear();
                self.sorter.invalidate();
                self.pending_sort = None;
                self.denied = Some(path.clone());
                self.emit(SessionEvent::PermissionDenied(path));
                self.publish_files();
            }
        }
        self.set_loading(false);
    }

    // Observers

    fn set_loading(&mut self, loading: bool) {
        if self.is_loading == loading {
            return;
        }
        self.is_loading = loading;
        self.emit(SessionEvent::LoadingChanged(loading));
    }

    fn publish_files(&mut self) {
        let files: Arc<[FileItem]> = Arc::from(self.files.as_slice());
        self.emit(SessionEvent::FilesChanged(files));
    }

    fn emit(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

// BrowserSession tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lister::MemoryLister;
    use std::time::{SystemTime, UNIX_EPOCH};

    const WAIT: Duration = Duration::from_secs(2);

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn granted() -> SessionOptions {
        SessionOptions {
            permission_granted: true,
            ..SessionOptions::default()
        }
    }

    fn names(session: &BrowserSession) -> Vec<&str> {
        session.current_files().iter().map(|f| f.name()).collect()
    }

    fn sdcard() -> MemoryLister {
        MemoryLister::new().with_dir(
            "/sdcard",
            vec![
                FileItem::file("/sdcard/b.txt", 10, at(1)),
                FileItem::file("/sdcard/a.txt", 20, at(2)),
                FileItem::dir("/sdcard/photos", at(0)),
            ],
        )
    }

    #[test]
    fn initial_listing_is_sorted_by_name() {
        let mut session =
            BrowserSession::new(PathBuf::from("/sdcard"), Arc::new(sdcard()), granted());
        assert!(session.is_loading());
        assert!(session.wait_idle(WAIT));
        assert!(!session.is_loading());
        assert_eq!(names(&session), ["a.txt", "b.txt", "photos"]);
        assert_eq!(session.sort_key(), SortKey::NameAsc);
    }

    #[test]
    fn nothing_is_listed_before_permission() {
        let lister = Arc::new(sdcard());
        let mut session = BrowserSession::new(
            PathBuf::from("/sdcard"),
            lister.clone(),
            SessionOptions::default(),
        );
        assert!(!session.is_loading());
        assert!(session.wait_idle(Duration::from_millis(50)));
        assert_eq!(lister.calls(), 0);

        session.grant_permission();
        assert!(session.wait_idle(WAIT));
        assert_eq!(lister.calls(), 1);
        assert_eq!(session.current_files().len(), 3);
    }

    #[test]
    fn sort_request_reorders_synchronously() -> Result<(), Box<dyn std::error::Error>> {
        let mut session =
            BrowserSession::new(PathBuf::from("/sdcard"), Arc::new(sdcard()), granted());
        session.wait_idle(WAIT);

        session.request_sort(SortKey::SizeDesc);
        assert_eq!(names(&session), ["a.txt", "b.txt", "photos"]);
        session.request_sort_index(2)?;
        assert_eq!(names(&session), ["photos", "b.txt", "a.txt"]);
        assert_eq!(session.sort_key(), SortKey::SizeAsc);
        Ok(())
    }

    #[test]
    fn invalid_sort_index_changes_nothing() {
        let mut session =
            BrowserSession::new(PathBuf::from("/sdcard"), Arc::new(sdcard()), granted());
        session.wait_idle(WAIT);
        let before = session.current_files().to_vec();

        assert_eq!(
            session.request_sort_index(8),
            Err(SortError::InvalidIndex(8))
        );
        assert_eq!(session.current_files(), before.as_slice());
        assert_eq!(session.sort_key(), SortKey::NameAsc);
    }

    #[test]
    fn loading_brackets_the_listing() {
        let mut session = BrowserSession::new(
            PathBuf::from("/sdcard"),
            Arc::new(sdcard()),
            SessionOptions::default(),
        );
        let events = session.subscribe();
        session.grant_permission();
        session.wait_idle(WAIT);

        let got: Vec<SessionEvent> = events.try_iter().collect();
        assert_eq!(got.len(), 3, "events: {got:?}");
        assert_eq!(got[0], SessionEvent::LoadingChanged(true));
        assert!(matches!(&got[1], SessionEvent::FilesChanged(f) if f.len() == 3));
        assert_eq!(got[2], SessionEvent::LoadingChanged(false));
    }

    #[test]
    fn superseding_request_keeps_loading_set_once() {
        let lister = sdcard().with_delay("/sdcard", Duration::from_millis(100));
        let mut session =
            BrowserSession::new(PathBuf::from("/sdcard"), Arc::new(lister), granted());
        assert!(session.wait_idle(WAIT));
        let events = session.subscribe();

        session.request_listing(PathBuf::from("/sdcard"), None);
        session.request_listing(PathBuf::from("/sdcard"), Some(SortKey::SizeDesc));
        assert!(session.wait_idle(WAIT));

        let loading: Vec<SessionEvent> = events
            .try_iter()
            .filter(|e| matches!(e, SessionEvent::LoadingChanged(_)))
            .collect();
        assert_eq!(
            loading,
            [
                SessionEvent::LoadingChanged(true),
                SessionEvent::LoadingChanged(false)
            ]
        );
        assert_eq!(names(&session), ["a.txt", "b.txt", "photos"]);
    }
}
