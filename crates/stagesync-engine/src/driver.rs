//! The per-target synchronization driver

use crate::{
    arbiter::{self, ConfirmProvider, OverwriteDecision},
    retain::{list_plain_files, plan_deletions},
    select::select_latest,
};
use serde::{Deserialize, Serialize};
use stagesync_config::{PromptConfig, SelectionConfig, TargetSpec};
use stagesync_types::{
    CopyOutcome, DeleteReport, Error, FileReport, Result, SubdirNote, SubdirReport, SyncStats,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs;
use tracing::{debug, info, warn};

/// Synchronization request for one (source, target) pair
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Source root containing per-project subdirectories
    pub source: PathBuf,
    /// Target root receiving the mirrored subdirectories
    pub target: PathBuf,
    /// Sync options
    pub options: SyncOptions,
    /// Request ID for tracking
    pub request_id: uuid::Uuid,
}

impl SyncRequest {
    /// Create a new sync request with default options
    pub fn new<P: AsRef<Path>>(source: P, target: P) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            target: target.as_ref().to_path_buf(),
            options: SyncOptions::default(),
            request_id: uuid::Uuid::new_v4(),
        }
    }

    /// Set sync options
    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }
}

/// Options for one target's pass
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Delete stale files from target subdirectories
    pub clean_old: bool,
    /// Restrict selection to filenames carrying a version token
    pub version_filter: bool,
    /// Consult the decision provider before overwriting an existing file
    pub confirm_overwrite: bool,
    /// Preserve the source modification timestamp on copied files
    pub preserve_timestamps: bool,
    /// Record would-be outcomes without touching the filesystem
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            clean_old: false,
            version_filter: true,
            confirm_overwrite: true,
            preserve_timestamps: true,
            dry_run: false,
        }
    }
}

impl SyncOptions {
    /// Derive options for a configured target
    pub fn from_target(
        target: &TargetSpec,
        selection: &SelectionConfig,
        prompt: &PromptConfig,
    ) -> Self {
        Self {
            clean_old: target.options.clean_old,
            version_filter: selection.version_filter,
            confirm_overwrite: prompt.confirm_overwrite,
            ..Self::default()
        }
    }
}

/// Result of one target's pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResult {
    /// Request ID
    pub request_id: uuid::Uuid,
    /// Per-subdirectory reports, in processing order
    pub reports: Vec<SubdirReport>,
    /// Aggregate counters for the pass
    pub stats: SyncStats,
    /// Pass duration
    pub duration: Duration,
}

/// Drives one target's pass over every source subdirectory
///
/// The driver owns no state across targets; create it once and call
/// [`SyncDriver::sync`] once per configured target. Failure isolation is
/// per file: a failed deletion or copy is recorded and processing continues
/// with the next file, subdirectory and target.
pub struct SyncDriver<'a> {
    decider: &'a mut dyn ConfirmProvider,
}

impl<'a> SyncDriver<'a> {
    /// Create a driver around an injected overwrite decision provider
    pub fn new(decider: &'a mut dyn ConfirmProvider) -> Self {
        Self { decider }
    }

    /// Perform one target's pass
    ///
    /// Fails only when the source root is absent; every smaller failure is
    /// recorded in the returned reports instead.
    pub async fn sync(&mut self, request: SyncRequest) -> Result<SyncResult> {
        let start_time = Instant::now();

        info!(
            "Starting sync: {} -> {}",
            request.source.display(),
            request.target.display()
        );

        match fs::metadata(&request.source).await {
            Ok(metadata) if metadata.is_dir() => {}
            _ => {
                return Err(Error::SourceRootMissing {
                    path: request.source.clone(),
                });
            }
        }

        let mut reports = Vec::new();
        let mut stats = SyncStats::new();

        let mut entries = fs::read_dir(&request.source).await.map_err(Error::from)?;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("Stopped listing '{}': {}", request.source.display(), e);
                    stats.errors += 1;
                    break;
                }
            };

            let is_dir = entry
                .metadata()
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let report = self
                .sync_subdir(&entry.path(), &request.target, &name, &request.options, &mut stats)
                .await;
            reports.push(report);
        }

        stats.duration = start_time.elapsed();
        let duration = stats.duration;

        info!(
            "Sync completed: {} written, {} skipped, {} deleted, {} errors in {:?}",
            stats.files_written(),
            stats.files_skipped,
            stats.files_deleted,
            stats.errors,
            duration
        );

        Ok(SyncResult {
            request_id: request.request_id,
            reports,
            stats,
            duration,
        })
    }

    /// Process one source subdirectory
    async fn sync_subdir(
        &mut self,
        subdir: &Path,
        target_root: &Path,
        name: &str,
        options: &SyncOptions,
        stats: &mut SyncStats,
    ) -> SubdirReport {
        info!("Processing subdirectory: {}", name);
        let mut report = SubdirReport::new(name);

        let latest = select_latest(subdir, options.version_filter).await;

        // The target subdirectory is created even when nothing qualifies,
        // so an empty project still mirrors its structure.
        let target_subdir = target_root.join(name);
        if !options.dry_run {
            if let Err(e) = fs::create_dir_all(&target_subdir).await {
                warn!(
                    "Failed to create target directory '{}': {}",
                    target_subdir.display(),
                    e
                );
                stats.errors += 1;
                return report.with_note(SubdirNote::TargetCreateFailed(e.to_string()));
            }
        }

        if latest.is_empty() {
            info!("No qualifying files in '{}'", name);
            return report.with_note(SubdirNote::NoQualifyingFiles);
        }

        report.latest = latest
            .iter()
            .map(|f| (f.name.clone(), f.modified))
            .collect();

        // The keep set comes from the latest set before anything is touched;
        // a file in the latest set can never be planned for deletion.
        if options.clean_old {
            let keep: HashSet<String> = latest.names().into_iter().collect();
            let existing = list_plain_files(&target_subdir).await;
            for stale in plan_deletions(&existing, &keep) {
                let outcome = self
                    .delete_stale(&target_subdir.join(&stale), options.dry_run)
                    .await;
                match &outcome {
                    Ok(()) => stats.files_deleted += 1,
                    Err(reason) => {
                        warn!("Failed to delete '{}': {}", stale, reason);
                        stats.errors += 1;
                    }
                }
                report.deletions.push(DeleteReport {
                    name: stale,
                    result: outcome,
                });
            }
        }

        for file in &latest {
            let destination = target_subdir.join(&file.name);
            let exists = fs::try_exists(&destination).await.unwrap_or(false);

            let decision = if options.confirm_overwrite {
                arbiter::decide(exists, self.decider, &file.name)
            } else {
                OverwriteDecision::Proceed
            };

            let outcome = match decision {
                OverwriteDecision::Skip => {
                    debug!("Skipped by user: {}", file.name);
                    CopyOutcome::SkippedByUser
                }
                OverwriteDecision::Proceed => {
                    if options.dry_run {
                        debug!(
                            "DRY RUN: Would copy {} -> {}",
                            file.path.display(),
                            destination.display()
                        );
                        if exists {
                            CopyOutcome::Replaced
                        } else {
                            CopyOutcome::Copied
                        }
                    } else {
                        match self.copy_file(&file.path, &destination, options).await {
                            Ok(()) => {
                                if exists {
                                    CopyOutcome::Replaced
                                } else {
                                    CopyOutcome::Copied
                                }
                            }
                            Err(e) => {
                                warn!("Failed to copy '{}': {}", file.name, e);
                                CopyOutcome::Failed {
                                    reason: e.to_string(),
                                }
                            }
                        }
                    }
                }
            };

            stats.record_outcome(&outcome);
            report.copies.push(FileReport {
                name: file.name.clone(),
                outcome,
            });
        }

        report
    }

    /// Copy a single file, preserving its modification timestamp
    async fn copy_file(
        &self,
        source: &Path,
        destination: &Path,
        options: &SyncOptions,
    ) -> Result<()> {
        fs::copy(source, destination).await.map_err(|e| {
            Error::copy(source, destination, e.to_string())
        })?;

        if options.preserve_timestamps {
            let metadata = fs::metadata(source).await.map_err(|e| {
                Error::copy(source, destination, format!("metadata: {}", e))
            })?;

            if let Ok(modified) = metadata.modified() {
                filetime::set_file_mtime(
                    destination,
                    filetime::FileTime::from_system_time(modified),
                )
                .map_err(|e| {
                    Error::copy(source, destination, format!("set mtime: {}", e))
                })?;
            }
        }

        debug!("Copied: {} -> {}", source.display(), destination.display());
        Ok(())
    }

    /// Delete one stale file
    async fn delete_stale(
        &self,
        path: &Path,
        dry_run: bool,
    ) -> std::result::Result<(), String> {
        if dry_run {
            debug!("DRY RUN: Would delete {}", path.display());
            return Ok(());
        }

        fs::remove_file(path)
            .await
            .map_err(|e| e.to_string())
            .map(|()| debug!("Deleted: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::AutoProceed;

    #[test]
    fn test_sync_request_creation() {
        let request = SyncRequest::new("releases", "staging");

        assert_eq!(request.source, PathBuf::from("releases"));
        assert_eq!(request.target, PathBuf::from("staging"));
        assert!(!request.options.clean_old);
        assert!(request.options.version_filter);
    }

    #[test]
    fn test_sync_options_from_target() {
        let target = TargetSpec::new("/mnt/backup").with_clean_old(true);
        let selection = SelectionConfig { version_filter: false };
        let prompt = PromptConfig {
            confirm_overwrite: true,
        };

        let options = SyncOptions::from_target(&target, &selection, &prompt);

        assert!(options.clean_old);
        assert!(!options.version_filter);
        assert!(options.confirm_overwrite);
        assert!(!options.dry_run);
    }

    #[tokio::test]
    async fn test_missing_source_root_fails_the_pass() {
        let mut decider = AutoProceed;
        let mut driver = SyncDriver::new(&mut decider);
        let request = SyncRequest::new("/does/not/exist", "/tmp/irrelevant");

        let result = driver.sync(request).await;

        assert!(matches!(result, Err(Error::SourceRootMissing { .. })));
    }
}
