//! The entry model for dirscope.
//!
//! Provides the [FileItem] value type, which is produced by every listing, and the
//! comparison strategies used by the sort engine.
//!
//! Comparators are total: a tie on the primary attribute falls back to the name and
//! then the path, so repeated sorts of the same items always produce the same order.
//! Descending order is the exact reverse of ascending order, tie-breaks included.

use crate::core::sort::{SortAttr, SortDirection, SortKey};

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A single filesystem entry in a listing.
///
/// Never mutated after construction. Directories carry a size of 0 and an empty extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    name: String,
    path: PathBuf,
    is_dir: bool,
    size_bytes: u64,
    extension: String,
    last_modified: SystemTime,
}

impl FileItem {
    /// Builds an item from its path and metadata.
    ///
    /// The name is the last path component. Paths without one (a filesystem root) use the
    /// whole path as the name so the name is never empty.
    pub fn new(path: PathBuf, is_dir: bool, size_bytes: u64, last_modified: SystemTime) -> Self {
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().into_owned(),
            None => path.to_string_lossy().into_owned(),
        };

        let (size_bytes, extension) = if is_dir {
            (0, String::new())
        } else {
            let ext = Path::new(&name)
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            (size_bytes, ext)
        };

        FileItem {
            name,
            path,
            is_dir,
            size_bytes,
            extension,
            last_modified,
        }
    }

    pub fn file(path: impl Into<PathBuf>, size_bytes: u64, last_modified: SystemTime) -> Self {
        Self::new(path.into(), false, size_bytes, last_modified)
    }

    pub fn dir(path: impl Into<PathBuf>, last_modified: SystemTime) -> Self {
        Self::new(path.into(), true, 0, last_modified)
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    #[inline]
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    #[inline]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[inline]
    pub fn last_modified(&self) -> SystemTime {
        self.last_modified
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Rules shared by every comparator.
///
/// The defaults keep directories mixed in with files and compare names case-sensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareRules {
    pub dirs_first: bool,
    pub case_insensitive: bool,
}

impl CompareRules {
    pub fn new(dirs_first: bool, case_insensitive: bool) -> Self {
        Self {
            dirs_first,
            case_insensitive,
        }
    }

    /// Total order of two items under `key`.
    pub fn compare(&self, a: &FileItem, b: &FileItem, key: SortKey) -> Ordering {
        let group = if self.dirs_first {
            b.is_dir.cmp(&a.is_dir)
        } else {
            Ordering::Equal
        };

        group.then_with(|| {
            let asc = self.compare_ascending(a, b, key.attr());
            match key.direction() {
                SortDirection::Ascending => asc,
                SortDirection::Descending => asc.reverse(),
            }
        })
    }

    fn compare_ascending(&self, a: &FileItem, b: &FileItem, attr: SortAttr) -> Ordering {
        let primary = match attr {
            SortAttr::Name => Ordering::Equal,
            SortAttr::Size => a.size_bytes.cmp(&b.size_bytes),
            SortAttr::Date => a.last_modified.cmp(&b.last_modified),
            SortAttr::Extension => self.compare_text(&a.extension, &b.extension),
        };
        primary
            .then_with(|| self.compare_text(&a.name, &b.name))
            .then_with(|| a.path.cmp(&b.path))
    }

    fn compare_text(&self, a: &str, b: &str) -> Ordering {
        if self.case_insensitive {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        } else {
            a.cmp(b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn file_item_derives_name_and_extension() {
        let f = FileItem::file("/sdcard/notes.tar.gz", 42, at(1));
        assert_eq!(f.name(), "notes.tar.gz");
        assert_eq!(f.extension(), "gz");
        assert_eq!(f.size_bytes(), 42);
        assert!(!f.is_dir());

        let dotfile = FileItem::file("/sdcard/.profile", 1, at(1));
        assert_eq!(dotfile.extension(), "");
        assert!(dotfile.is_hidden());
    }

    #[test]
    fn directories_have_no_size_or_extension() {
        let d = FileItem::new(PathBuf::from("/sdcard/photos.d"), true, 4096, at(1));
        assert!(d.is_dir());
        assert_eq!(d.size_bytes(), 0);
        assert_eq!(d.extension(), "");
        assert_eq!(d.name(), "photos.d");
    }

    #[test]
    fn root_path_name_is_never_empty() {
        let root = FileItem::dir("/", at(0));
        assert!(!root.name().is_empty());
    }

    #[test]
    fn equal_sizes_fall_back_to_name() {
        let rules = CompareRules::default();
        let a = FileItem::file("/x/alpha", 10, at(5));
        let b = FileItem::file("/x/beta", 10, at(1));
        assert_eq!(rules.compare(&a, &b, SortKey::SizeAsc), Ordering::Less);
        assert_eq!(rules.compare(&b, &a, SortKey::SizeAsc), Ordering::Greater);
        assert_eq!(rules.compare(&a, &b, SortKey::SizeDesc), Ordering::Greater);
    }

    #[test]
    fn name_comparison_is_case_sensitive_by_default() {
        let upper = FileItem::file("/x/Zebra", 1, at(1));
        let lower = FileItem::file("/x/apple", 1, at(1));

        let sensitive = CompareRules::default();
        assert_eq!(
            sensitive.compare(&upper, &lower, SortKey::NameAsc),
            Ordering::Less
        );

        let insensitive = CompareRules::new(false, true);
        assert_eq!(
            insensitive.compare(&upper, &lower, SortKey::NameAsc),
            Ordering::Greater
        );
    }

    #[test]
    fn dirs_first_groups_directories_in_both_directions() {
        let rules = CompareRules::new(true, false);
        let dir = FileItem::dir("/x/zzz", at(1));
        let file = FileItem::file("/x/aaa", 1, at(1));
        assert_eq!(rules.compare(&dir, &file, SortKey::NameAsc), Ordering::Less);
        assert_eq!(rules.compare(&dir, &file, SortKey::NameDesc), Ordering::Less);

        let mixed = CompareRules::default();
        assert_eq!(
            mixed.compare(&dir, &file, SortKey::NameAsc),
            Ordering::Greater
        );
    }

    #[test]
    fn identical_items_compare_equal() {
        let rules = CompareRules::default();
        let a = FileItem::file("/x/same.txt", 3, at(3));
        for key in SortKey::ALL {
            assert_eq!(rules.compare(&a, &a.clone(), key), Ordering::Equal);
        }
    }
}
