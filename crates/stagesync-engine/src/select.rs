//! Latest-set selection over a source subdirectory

use crate::version::has_version_token;
use stagesync_types::{CandidateFile, LatestSet};
use std::path::Path;
use std::time::SystemTime;
use tokio::fs;
use tracing::{debug, warn};

/// Select every file sharing the maximum modification timestamp
///
/// Enumerates the immediate plain-file entries of `subdir` (no recursion),
/// optionally restricted to filenames carrying a version token, and returns
/// all files whose timestamp equals the maximum by exact equality, in
/// discovery order. Ties at the maximum are intentional and common, e.g.
/// after a bulk extraction.
///
/// Fails softly: a missing or unreadable directory yields an empty set.
pub async fn select_latest(subdir: &Path, version_filter: bool) -> LatestSet {
    let mut candidates: Vec<CandidateFile> = Vec::new();

    let mut entries = match fs::read_dir(subdir).await {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot read '{}': {}", subdir.display(), e);
            return LatestSet::new();
        }
    };

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!("Stopped listing '{}': {}", subdir.display(), e);
                break;
            }
        };

        let metadata = match entry.metadata().await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Skipping '{}': {}", entry.path().display(), e);
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if version_filter && !has_version_token(&name) {
            continue;
        }

        candidates.push(CandidateFile {
            name,
            path: entry.path(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        });
    }

    let Some(max_modified) = candidates.iter().map(|c| c.modified).max() else {
        return LatestSet::new();
    };

    let mut latest = LatestSet::new();
    for candidate in candidates {
        if candidate.modified == max_modified {
            latest.push(candidate);
        }
    }
    latest
}
