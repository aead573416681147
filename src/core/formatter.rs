//! Display formatting helpers for file items in dirscope.
//!
//! Formats sizes, modification times and names for the listing printed by the front end.

use crate::core::FileItem;

use chrono::{DateTime, Local};
use humansize::{DECIMAL, format_size};
use unicode_width::UnicodeWidthChar;

use std::time::{SystemTime, UNIX_EPOCH};

/// Formats the file size into a human-readable string.
/// # Returns
/// A string representing the formatted file size or "-" for directories.
pub fn format_file_size(size: u64, is_dir: bool) -> String {
    if is_dir {
        "-".into()
    } else {
        format_size(size, DECIMAL)
    }
}

/// Formats the file modification time into a human-readable string.
/// # Returns
/// A string representing the formatted modification time or "-" if unknown.
pub fn format_file_time(modified: SystemTime) -> String {
    if modified == UNIX_EPOCH {
        return "-".to_string();
    }
    let dt: DateTime<Local> = DateTime::from(modified);
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Display name of an item, directories get a trailing separator.
pub fn display_name(item: &FileItem) -> String {
    if item.is_dir() {
        format!("{}{}", item.name(), std::path::MAIN_SEPARATOR)
    } else {
        item.name().to_string()
    }
}

/// Cleans the output to the given column width
/// by removing control characters, expanding tabs to 4 spaces,
/// and truncating or padding the string to fit exactly.
/// # Returns
/// A sanitized string that fits exactly within the specified width.
pub fn sanitize_to_exact_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_w = 0;

    for char in line.chars() {
        if char == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > width {
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if char.is_control() {
            continue;
        }

        let w = char.width().unwrap_or(0);
        if current_w + w > width {
            break;
        }

        out.push(char);
        current_w += w;
    }

    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }

    out
}
