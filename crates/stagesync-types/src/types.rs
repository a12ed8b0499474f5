//! Core data types for stagesync
//!
//! This module provides the fundamental data types used throughout the
//! stagesync crates: candidate files, latest-set selection results,
//! per-file outcomes, per-subdirectory reports and aggregate statistics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// A plain file found inside a source subdirectory
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidateFile {
    /// File name, used as the join key with the target subdirectory
    pub name: String,
    /// Absolute path to the file
    pub path: PathBuf,
    /// Last-modified timestamp, platform native resolution
    pub modified: SystemTime,
}

/// All files in a subdirectory sharing the maximum qualifying timestamp
///
/// Ordered by discovery and duplicate-free. When several files tie at the
/// maximum timestamp every one of them is included; there is no arbitrary
/// single-winner pick.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatestSet {
    files: Vec<CandidateFile>,
}

impl LatestSet {
    /// Create an empty latest set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate, keeping the set duplicate-free by name
    pub fn push(&mut self, file: CandidateFile) {
        if !self.contains_name(&file.name) {
            self.files.push(file);
        }
    }

    /// The files in the set, in discovery order
    pub fn files(&self) -> &[CandidateFile] {
        &self.files
    }

    /// Check whether a file name is part of the set
    pub fn contains_name(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.name == name)
    }

    /// File names in discovery order
    pub fn names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }

    /// The shared maximum timestamp, if the set is non-empty
    pub fn timestamp(&self) -> Option<SystemTime> {
        self.files.first().map(|f| f.modified)
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of files in the set
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Iterate over the files in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, CandidateFile> {
        self.files.iter()
    }
}

impl IntoIterator for LatestSet {
    type Item = CandidateFile;
    type IntoIter = std::vec::IntoIter<CandidateFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<'a> IntoIterator for &'a LatestSet {
    type Item = &'a CandidateFile;
    type IntoIter = std::slice::Iter<'a, CandidateFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Outcome of one attempted file copy
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CopyOutcome {
    /// File did not exist at the destination and was copied
    Copied,
    /// File existed at the destination and was overwritten
    Replaced,
    /// User declined the overwrite, destination left untouched
    SkippedByUser,
    /// The copy failed
    Failed {
        /// Human-readable failure reason
        reason: String,
    },
}

impl CopyOutcome {
    /// Whether this outcome represents a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short label for display purposes
    pub fn label(&self) -> &'static str {
        match self {
            Self::Copied => "copied",
            Self::Replaced => "replaced",
            Self::SkippedByUser => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Per-file copy record within a subdirectory report
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FileReport {
    /// File name
    pub name: String,
    /// Copy outcome
    pub outcome: CopyOutcome,
}

/// Per-file deletion record within a subdirectory report
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeleteReport {
    /// File name
    pub name: String,
    /// `Ok` on success, `Err` with the failure reason otherwise
    pub result: std::result::Result<(), String>,
}

/// Informational state of a processed subdirectory
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SubdirNote {
    /// No qualifying files were found; not an error
    NoQualifyingFiles,
    /// The target subdirectory could not be created
    TargetCreateFailed(String),
}

impl std::fmt::Display for SubdirNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoQualifyingFiles => write!(f, "no qualifying files"),
            Self::TargetCreateFailed(reason) => {
                write!(f, "target directory could not be created: {}", reason)
            }
        }
    }
}

/// Report for one processed source subdirectory
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubdirReport {
    /// Subdirectory name
    pub name: String,
    /// Latest-set file names with their shared timestamp
    pub latest: Vec<(String, SystemTime)>,
    /// Per-deleted-file outcomes, in deletion order
    pub deletions: Vec<DeleteReport>,
    /// Per-copied-file outcomes, in copy order
    pub copies: Vec<FileReport>,
    /// Informational note when the subdirectory produced no copies
    pub note: Option<SubdirNote>,
}

impl SubdirReport {
    /// Create an empty report for a subdirectory
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            latest: Vec::new(),
            deletions: Vec::new(),
            copies: Vec::new(),
            note: None,
        }
    }

    /// Attach an informational note
    pub fn with_note(mut self, note: SubdirNote) -> Self {
        self.note = Some(note);
        self
    }
}

/// Aggregate counters for one synchronization pass
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SyncStats {
    /// Number of files copied to a previously absent destination
    pub files_copied: u64,
    /// Number of files overwritten at the destination
    pub files_replaced: u64,
    /// Number of files skipped by user decision
    pub files_skipped: u64,
    /// Number of stale files deleted
    pub files_deleted: u64,
    /// Number of errors encountered
    pub errors: u64,
    /// Total duration of the pass
    pub duration: Duration,
}

impl SyncStats {
    /// Create a new empty statistics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one copy outcome
    pub fn record_outcome(&mut self, outcome: &CopyOutcome) {
        match outcome {
            CopyOutcome::Copied => self.files_copied += 1,
            CopyOutcome::Replaced => self.files_replaced += 1,
            CopyOutcome::SkippedByUser => self.files_skipped += 1,
            CopyOutcome::Failed { .. } => self.errors += 1,
        }
    }

    /// Total number of files written to the destination
    pub fn files_written(&self) -> u64 {
        self.files_copied + self.files_replaced
    }

    /// Merge statistics from another instance
    pub fn merge(&mut self, other: &SyncStats) {
        self.files_copied += other.files_copied;
        self.files_replaced += other.files_replaced;
        self.files_skipped += other.files_skipped;
        self.files_deleted += other.files_deleted;
        self.errors += other.errors;
        self.duration += other.duration;
    }
}
