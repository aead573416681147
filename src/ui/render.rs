//! Rendering of listings into plain text lines.
//!
//! Each row holds the name padded to a fixed column, the size and the modification time.

use crate::app::BrowserSession;
use crate::core::formatter::{
    display_name, format_file_size, format_file_time, sanitize_to_exact_width,
};
use crate::core::{FileItem, SortKey};
use crate::utils::shorten_home_path;

use std::path::Path;

const SIZE_WIDTH: usize = 10;

/// Status line: directory, view mode, sort key and loading state.
pub fn render_header(dir: &Path, showing_updated: bool, sort: SortKey, loading: bool) -> String {
    let mode = if showing_updated { "updated" } else { "all" };
    let mut header = format!("{} [{}] sort: {}", shorten_home_path(dir), mode, sort);
    if loading {
        header.push_str(" (loading)");
    }
    header
}

/// One row per item. An empty list renders a single placeholder row.
pub fn render_listing(files: &[FileItem], name_width: usize, showing_updated: bool) -> Vec<String> {
    if files.is_empty() {
        let placeholder = if showing_updated {
            "[no updated files]"
        } else {
            "[empty directory]"
        };
        return vec![placeholder.to_string()];
    }

    files
        .iter()
        .map(|item| {
            format!(
                "{} {:>size_w$}  {}",
                sanitize_to_exact_width(&display_name(item), name_width),
                format_file_size(item.size_bytes(), item.is_dir()),
                format_file_time(item.last_modified()),
                size_w = SIZE_WIDTH,
            )
        })
        .collect()
}

/// Header plus listing of the session's current view.
pub fn render_session(session: &BrowserSession, name_width: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(session.current_files().len() + 2);
    lines.push(render_header(
        session.current_dir(),
        session.showing_updated(),
        session.sort_key(),
        session.is_loading(),
    ));
    if !session.permission_granted() {
        lines.push("[waiting for storage permission]".to_string());
        return lines;
    }
    if let Some(denied) = session.denied_path() {
        lines.push(format!(
            "[permission denied: {}]",
            shorten_home_path(denied)
        ));
        return lines;
    }
    lines.extend(render_listing(
        session.current_files(),
        name_width,
        session.showing_updated(),
    ));
    lines
}
