//! Navigation state for dirscope.
//!
//! Tracks the browsed directory, the back-navigation stack, the view mode (all files or
//! updated files only) and the two snapshot lists kept when switching modes.
//! Also owns the request id used to tell the latest listing apart from superseded ones.

use crate::core::FileItem;

use std::path::{Path, PathBuf};

/// Holds the navigation and view-mode state of one session.
#[derive(Debug)]
pub struct NavState {
    current_dir: PathBuf,
    back_stack: Vec<PathBuf>,
    showing_updated: bool,
    all_snapshot: Vec<FileItem>,
    updated_snapshot: Vec<FileItem>,
    request_id: u64,
}

impl NavState {
    pub fn new(root: PathBuf) -> Self {
        Self {
            current_dir: root,
            back_stack: Vec::new(),
            showing_updated: false,
            all_snapshot: Vec::new(),
            updated_snapshot: Vec::new(),
            request_id: 0,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn showing_updated(&self) -> bool {
        self.showing_updated
    }

    #[inline]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    #[inline]
    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.back_stack.len()
    }

    #[inline]
    pub fn all_snapshot(&self) -> &[FileItem] {
        &self.all_snapshot
    }

    #[inline]
    pub fn updated_snapshot(&self) -> &[FileItem] {
        &self.updated_snapshot
    }

    // Navigation functions

    /// Prepares a new request by incrementing the request ID.
    /// Responses carrying an older id are stale from then on.
    pub fn prepare_new_request(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.request_id
    }

    /// Replaces the browsed directory without touching the back stack.
    pub fn set_path(&mut self, path: PathBuf) {
        self.current_dir = path;
    }

    /// Pushes the current directory and moves into `child`.
    pub fn descend(&mut self, child: PathBuf) {
        let previous = std::mem::replace(&mut self.current_dir, child);
        self.back_stack.push(previous);
    }

    /// Pops the previous directory.
    /// Returns `false` when the stack is empty and nothing changed.
    pub fn go_back(&mut self) -> bool {
        match self.back_stack.pop() {
            Some(previous) => {
                self.current_dir = previous;
                true
            }
            None => false,
        }
    }

    /// Flips the view mode.
    ///
    /// The list currently shown is captured as the snapshot of the mode being left.
    /// Returns the snapshot of the mode being entered, as it was captured.
    pub fn toggle_mode(&mut self, shown: &[FileItem]) -> Vec<FileItem> {
        self.showing_updated = !self.showing_updated;
        if self.showing_updated {
            self.all_snapshot = shown.to_vec();
            self.updated_snapshot.clone()
        } else {
            self.updated_snapshot = shown.to_vec();
            self.all_snapshot.clone()
        }
    }
}
