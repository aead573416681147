//! Directory listing sources for dirscope.
//!
//! [DirectoryLister] is the seam between the session and the filesystem. It has two
//! implementations:
//! - [FsLister]: reads the real filesystem.
//! - [MemoryLister]: an in-memory fake with seeded directories, used by tests.
//!
//! Listers never let a raw I/O error escape. A missing or unreadable path yields an empty
//! listing; only a permission failure at the listed root is reported, as
//! [ListError::PermissionDenied].

use crate::core::error::ListError;
use crate::core::fm::{browse_dir, item_from_metadata, modified_after};
use crate::core::FileItem;

use walkdir::WalkDir;

use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of directory and updated-files listings.
///
/// Implementations are called from the worker thread.
pub trait DirectoryLister: Send + Sync {
    /// Immediate children of `path`, in enumeration order.
    fn list_directory(&self, path: &Path) -> Result<Vec<FileItem>, ListError>;

    /// Files modified after the lister's reference point, independent of any browsed path.
    fn list_updated_files(&self) -> Result<Vec<FileItem>, ListError>;
}

/// Reference point for the updated-files listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateBaseline(SystemTime);

impl UpdateBaseline {
    pub fn since(time: SystemTime) -> Self {
        Self(time)
    }

    /// `window` before now, clamped to the UNIX epoch.
    pub fn window(window: Duration) -> Self {
        let now = SystemTime::now();
        Self(
            now.checked_sub(window)
                .filter(|t| *t >= UNIX_EPOCH)
                .unwrap_or(UNIX_EPOCH),
        )
    }

    #[inline]
    pub fn time(&self) -> SystemTime {
        self.0
    }
}

/// Filesystem-backed lister.
///
/// Updated files are found by walking the storage root recursively, bounded in depth and
/// in the number of results.
#[derive(Debug, Clone)]
pub struct FsLister {
    root: PathBuf,
    baseline: UpdateBaseline,
    show_hidden: bool,
    max_depth: usize,
    max_results: usize,
}

impl FsLister {
    pub const DEFAULT_MAX_DEPTH: usize = 8;
    pub const DEFAULT_MAX_RESULTS: usize = 2000;

    pub fn new(root: impl Into<PathBuf>, baseline: UpdateBaseline) -> Self {
        let root = root.into();
        Self {
            root: absolutize(&root),
            baseline,
            show_hidden: true,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_results: Self::DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    // Getters

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn baseline(&self) -> UpdateBaseline {
        self.baseline
    }
}

impl DirectoryLister for FsLister {
    fn list_directory(&self, path: &Path) -> Result<Vec<FileItem>, ListError> {
        let path = absolutize(path);
        match browse_dir(&path, self.show_hidden) {
            Ok(items) => Ok(items),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                log::info!("Permission denied listing {}", path.display());
                Err(ListError::PermissionDenied(path))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Listing missing path {} as empty", path.display());
                Ok(Vec::new())
            }
            Err(e) => {
                log::warn!("Failed to list {}: {}", path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    fn list_updated_files(&self) -> Result<Vec<FileItem>, ListError> {
        let since = self.baseline.time();
        let show_hidden = self.show_hidden;
        let mut out = Vec::new();

        let walker = WalkDir::new(&self.root)
            .max_depth(self.max_depth)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || show_hidden || !e.file_name().as_encoded_bytes().starts_with(b".")
            });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    let denied = err
                        .io_error()
                        .is_some_and(|io| io.kind() == ErrorKind::PermissionDenied);
                    if err.depth() == 0 && denied {
                        log::info!("Permission denied walking {}", self.root.display());
                        return Err(ListError::PermissionDenied(self.root.clone()));
                    }
                    log::debug!("Skipping unreadable entry during walk: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(md) = entry.metadata() else {
                continue;
            };
            let item = item_from_metadata(entry.path(), &md);
            if modified_after(&item, since) {
                if out.len() >= self.max_results {
                    log::debug!("Updated files capped at {}", self.max_results);
                    break;
                }
                out.push(item);
            }
        }
        Ok(out)
    }
}

/// In-memory lister.
///
/// Directories, the updated-files set, denied paths and artificial delays are seeded
/// up front. Unknown paths list as empty.
#[derive(Debug, Default)]
pub struct MemoryLister {
    dirs: HashMap<PathBuf, Vec<FileItem>>,
    updated: Vec<FileItem>,
    denied: HashSet<PathBuf>,
    delays: HashMap<PathBuf, Duration>,
    updated_delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MemoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>, items: Vec<FileItem>) -> Self {
        self.dirs.insert(path.into(), items);
        self
    }

    pub fn with_updated(mut self, items: Vec<FileItem>) -> Self {
        self.updated = items;
        self
    }

    pub fn deny(mut self, path: impl Into<PathBuf>) -> Self {
        self.denied.insert(path.into());
        self
    }

    /// Makes every listing of `path` sleep for `delay` first.
    pub fn with_delay(mut self, path: impl Into<PathBuf>, delay: Duration) -> Self {
        self.delays.insert(path.into(), delay);
        self
    }

    pub fn with_updated_delay(mut self, delay: Duration) -> Self {
        self.updated_delay = Some(delay);
        self
    }

    /// Number of listings served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Acquire)
    }
}

impl DirectoryLister for MemoryLister {
    fn list_directory(&self, path: &Path) -> Result<Vec<FileItem>, ListError> {
        self.calls.fetch_add(1, Ordering::AcqRel);
        if let Some(delay) = self.delays.get(path) {
            thread::sleep(*delay);
        }
        if self.denied.contains(path) {
            return Err(ListError::PermissionDenied(path.to_path_buf()));
        }
        Ok(self.dirs.get(path).cloned().unwrap_or_default())
    }

    fn list_updated_files(&self) -> Result<Vec<FileItem>, ListError> {
        self.calls.fetch_add(1, Ordering::AcqRel);
        if let Some(delay) = self.updated_delay {
            thread::sleep(delay);
        }
        Ok(self.updated.clone())
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn set_mtime(path: &Path, time: SystemTime) -> std::io::Result<()> {
        File::options().write(true).open(path)?.set_modified(time)
    }

    #[test]
    fn relative_root_is_made_absolute() {
        let lister = FsLister::new("storage/emulated", UpdateBaseline::since(UNIX_EPOCH));
        assert!(lister.root().is_absolute());
        assert!(lister.root().ends_with("storage/emulated"));
        assert_eq!(lister.baseline().time(), UNIX_EPOCH);
    }

    #[test]
    fn missing_path_lists_empty() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let lister = FsLister::new(dir.path(), UpdateBaseline::since(UNIX_EPOCH));
        let items = lister.list_directory(&dir.path().join("gone"))?;
        assert!(items.is_empty());
        Ok(())
    }

    #[test]
    fn regular_file_as_root_lists_empty() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("plain.txt");
        File::create(&file)?;
        let lister = FsLister::new(dir.path(), UpdateBaseline::since(UNIX_EPOCH));
        assert!(lister.list_directory(&file)?.is_empty());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn zero_permission_dir_is_denied() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let locked = dir.path().join("locked");
        fs::create_dir(&locked)?;
        File::create(locked.join("inside.txt"))?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        // Privileged users bypass mode bits, nothing to check then
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
            return Ok(());
        }

        let lister = FsLister::new(dir.path(), UpdateBaseline::since(UNIX_EPOCH));
        let result = lister.list_directory(&locked);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        match result {
            Err(ListError::PermissionDenied(p)) => assert_eq!(p, locked),
            other => panic!("expected permission denied, got {:?}", other),
        }
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_child_dirs_are_left_out() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let locked = dir.path().join("locked");
        fs::create_dir(&locked)?;
        fs::create_dir(dir.path().join("open"))?;
        File::create(dir.path().join("plain.txt"))?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        // Privileged users bypass mode bits, nothing to check then
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
            return Ok(());
        }

        let lister = FsLister::new(dir.path(), UpdateBaseline::since(UNIX_EPOCH));
        let result = lister.list_directory(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        let mut names: Vec<String> = result?.iter().map(|f| f.name().to_string()).collect();
        names.sort();
        assert_eq!(names, ["open", "plain.txt"]);
        Ok(())
    }

    #[test]
    fn updated_files_walk_recursively_and_respect_baseline()
    -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let nested = dir.path().join("docs").join("drafts");
        fs::create_dir_all(&nested)?;

        let old = dir.path().join("old.txt");
        let fresh_top = dir.path().join("fresh.txt");
        let fresh_deep = nested.join("deep.md");
        for p in [&old, &fresh_top, &fresh_deep] {
            File::create(p)?;
        }

        let baseline = SystemTime::now() - Duration::from_secs(3600);
        set_mtime(&old, baseline - Duration::from_secs(3600))?;

        let lister = FsLister::new(dir.path(), UpdateBaseline::since(baseline));
        let mut names: Vec<_> = lister
            .list_updated_files()?
            .into_iter()
            .map(|f| f.name().to_string())
            .collect();
        names.sort();

        assert_eq!(names, ["deep.md", "fresh.txt"]);
        Ok(())
    }

    #[test]
    fn updated_files_honor_depth_and_cap() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested)?;
        File::create(nested.join("too_deep.txt"))?;
        for i in 0..5 {
            File::create(dir.path().join(format!("top_{i}.txt")))?;
        }

        let lister = FsLister::new(dir.path(), UpdateBaseline::since(UNIX_EPOCH)).with_max_depth(1);
        let items = lister.list_updated_files()?;
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|f| f.name() != "too_deep.txt"));

        let capped = FsLister::new(dir.path(), UpdateBaseline::since(UNIX_EPOCH)).with_max_results(2);
        assert_eq!(capped.list_updated_files()?.len(), 2);
        Ok(())
    }

    #[test]
    fn updated_files_never_include_directories() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("newdir"))?;
        let lister = FsLister::new(dir.path(), UpdateBaseline::since(UNIX_EPOCH));
        assert!(lister.list_updated_files()?.is_empty());
        Ok(())
    }

    #[test]
    fn window_baseline_is_in_the_past() {
        let b = UpdateBaseline::window(Duration::from_secs(60));
        assert!(b.time() < SystemTime::now());
        let huge = UpdateBaseline::window(Duration::from_secs(u64::MAX / 4));
        assert!(huge.time() >= UNIX_EPOCH);
        let century = UpdateBaseline::window(Duration::from_secs(200 * 365 * 86_400));
        assert_eq!(century.time(), UNIX_EPOCH);
    }

    #[test]
    fn epoch_mtime_is_never_updated_by_a_wide_window() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let stamped = dir.path().join("epoch.txt");
        File::create(&stamped)?;
        set_mtime(&stamped, UNIX_EPOCH)?;

        let wide = UpdateBaseline::window(Duration::from_secs(200 * 365 * 86_400));
        let lister = FsLister::new(dir.path(), wide);
        assert!(lister.list_updated_files()?.is_empty());
        Ok(())
    }

    #[test]
    fn zero_result_cap_lists_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("one.txt"))?;
        let lister = FsLister::new(dir.path(), UpdateBaseline::since(UNIX_EPOCH)).with_max_results(0);
        assert!(lister.list_updated_files()?.is_empty());
        Ok(())
    }

    #[test]
    fn memory_lister_serves_seeded_data() -> Result<(), Box<dyn std::error::Error>> {
        let now = SystemTime::now();
        let lister = MemoryLister::new()
            .with_dir("/sdcard", vec![FileItem::file("/sdcard/a.txt", 1, now)])
            .with_updated(vec![FileItem::file("/sdcard/x/new.txt", 2, now)])
            .deny("/sdcard/private");

        assert_eq!(lister.list_directory(Path::new("/sdcard"))?.len(), 1);
        assert!(lister.list_directory(Path::new("/nowhere"))?.is_empty());
        assert!(matches!(
            lister.list_directory(Path::new("/sdcard/private")),
            Err(ListError::PermissionDenied(_))
        ));
        assert_eq!(lister.list_updated_files()?.len(), 1);
        assert_eq!(lister.calls(), 4);
        Ok(())
    }
}
