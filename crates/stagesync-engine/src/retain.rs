//! Retention planning for target subdirectories
//!
//! A stale file is one present in a target subdirectory but absent from the
//! current latest set. The deletion plan is a pure set difference, computed
//! in full before any file operation, so a file named in the latest set can
//! never be planned for deletion.

use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Compute which existing files are stale and due for deletion
///
/// Returns `existing` minus `keep`, preserving the order of `existing`.
pub fn plan_deletions(existing: &[String], keep: &HashSet<String>) -> Vec<String> {
    existing
        .iter()
        .filter(|name| !keep.contains(*name))
        .cloned()
        .collect()
}

/// List the immediate plain files of a directory, non-recursive
///
/// A missing or unreadable directory yields an empty list.
pub async fn list_plain_files(dir: &Path) -> Vec<String> {
    let mut names = Vec::new();

    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot read '{}': {}", dir.display(), e);
            return names;
        }
    };

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!("Stopped listing '{}': {}", dir.display(), e);
                break;
            }
        };

        match entry.metadata().await {
            Ok(metadata) if metadata.is_file() => {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
            Ok(_) => {}
            Err(e) => warn!("Skipping '{}': {}", entry.path().display(), e),
        }
    }

    names
}
