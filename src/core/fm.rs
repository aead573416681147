//! Filesystem reading for dirscope.
//!
//! Turns directory entries into [FileItem]s. Used by the filesystem lister for both the
//! immediate-children listing and the updated-files walk.

use crate::core::FileItem;

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Builds a [FileItem] from a path and its metadata.
/// A modification time the platform cannot report falls back to the UNIX epoch.
pub(crate) fn item_from_metadata(path: &Path, md: &Metadata) -> FileItem {
    let modified = md.modified().unwrap_or(UNIX_EPOCH);
    FileItem::new(path.to_path_buf(), md.is_dir(), md.len(), modified)
}

/// Reads the immediate children of the provided directory.
///
/// Entries that vanish or cannot be inspected while reading are skipped, as are
/// subdirectories the caller has no permission to open.
/// # Returns
/// The entries in filesystem enumeration order, or the error from opening the directory.
pub(crate) fn browse_dir(path: &Path, show_hidden: bool) -> io::Result<Vec<FileItem>> {
    let mut entries = Vec::with_capacity(256);

    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !show_hidden && entry.file_name().as_encoded_bytes().first() == Some(&b'.') {
            continue;
        }

        let entry_path = entry.path();
        let ft = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };

        let md_res = if ft.is_symlink() {
            fs::metadata(&entry_path).or_else(|_| entry.metadata())
        } else {
            entry.metadata()
        };

        let Ok(md) = md_res else {
            continue;
        };

        // only directories the caller may open are listed
        if md.is_dir() && fs::read_dir(&entry_path).is_err() {
            log::debug!("Skipping unreadable directory {}", entry_path.display());
            continue;
        }
        entries.push(item_from_metadata(&entry_path, &md));
    }
    Ok(entries)
}

/// True when `item` was modified strictly after `since`.
#[inline]
pub(crate) fn modified_after(item: &FileItem, since: SystemTime) -> bool {
    item.last_modified() > since
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn browse_reports_files_and_dirs() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let mut file = File::create(tmp.path().join("hello.txt"))?;
        write!(file, "abc123")?;
        fs::create_dir(tmp.path().join("sub"))?;

        let mut entries = browse_dir(tmp.path(), true)?;
        entries.sort_by(|a, b| a.name().cmp(b.name()));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name(), "hello.txt");
        assert_eq!(entries[0].size_bytes(), 6);
        assert_eq!(entries[0].extension(), "txt");
        assert!(entries[1].is_dir());
        assert_eq!(entries[1].size_bytes(), 0);
        assert_eq!(entries[1].path(), tmp.path().join("sub"));
        Ok(())
    }

    #[test]
    fn browse_is_not_recursive() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let nested = tmp.path().join("a").join("b");
        fs::create_dir_all(&nested)?;
        File::create(nested.join("deep.txt"))?;

        let entries = browse_dir(tmp.path(), true)?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "a");
        Ok(())
    }

    #[test]
    fn browse_skips_hidden_when_requested() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join(".secret"))?;
        File::create(tmp.path().join("visible"))?;

        assert_eq!(browse_dir(tmp.path(), true)?.len(), 2);
        let shown = browse_dir(tmp.path(), false)?;
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name(), "visible");
        Ok(())
    }

    #[test]
    fn browse_nonexistent() {
        let path = PathBuf::from("/path/does/not/exist");
        let result = browse_dir(&path, true);
        assert!(result.is_err());
    }
}
