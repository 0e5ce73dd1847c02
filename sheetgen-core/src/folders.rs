//! Destination folder discovery

use std::fs;
use std::path::Path;
use tracing::warn;

/// Names of the immediate subdirectories of `root`, sorted.
///
/// Errors are logged and yield an empty list; callers treat "no folders" as
/// the failure.
pub fn available_folders<P: AsRef<Path>>(root: P) -> Vec<String> {
    let root = root.as_ref();
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Folder scan failed for {}: {}", root.display(), e);
            return Vec::new();
        }
    };

    let mut folders: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    folders.sort();
    folders
}
