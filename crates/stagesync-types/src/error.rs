//! Error types and handling for stagesync
//!
//! Errors carry a [`FailureScope`] describing the largest unit of work they
//! are allowed to abort: a single file, one source subdirectory, one
//! configured target, or the whole run. The sync driver uses the scope to
//! decide whether to record an error and continue or to propagate it.

use std::path::PathBuf;

/// The largest unit of work an error may abort
///
/// Scopes are ordered: an error never aborts a unit larger than its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureScope {
    /// Only the current file operation is abandoned
    File,
    /// The current source subdirectory is abandoned
    Subdirectory,
    /// The current target's pass is abandoned
    Target,
    /// The entire run is abandoned
    Run,
}

/// Main error type for stagesync operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// Source root directory absent at sync time
    #[error("Source directory does not exist: {path}")]
    SourceRootMissing {
        /// Path to the missing source root
        path: PathBuf,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Target directory could not be created
    #[error("Failed to create target directory '{path}': {message}")]
    TargetCreate {
        /// Path to the directory that could not be created
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// A planned stale-file deletion failed
    #[error("Failed to delete '{path}': {message}")]
    Delete {
        /// Path to the file that could not be deleted
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// A single file copy failed
    #[error("Failed to copy '{source_path}' to '{destination}': {message}")]
    Copy {
        /// Source file path
        source_path: PathBuf,
        /// Destination file path
        destination: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// The interactive decision channel errored
    #[error("Prompt error: {message}")]
    Prompt {
        /// Error message from the input device
        message: String,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O related errors
    Io,
    /// Missing source root
    SourceMissing,
    /// Configuration errors
    Config,
    /// Target directory creation errors
    TargetCreate,
    /// Stale-file deletion errors
    Delete,
    /// File copy errors
    Copy,
    /// Interactive prompt errors
    Prompt,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::SourceRootMissing { .. } => ErrorKind::SourceMissing,
            Self::Config { .. } => ErrorKind::Config,
            Self::TargetCreate { .. } => ErrorKind::TargetCreate,
            Self::Delete { .. } => ErrorKind::Delete,
            Self::Copy { .. } => ErrorKind::Copy,
            Self::Prompt { .. } => ErrorKind::Prompt,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Get the failure scope for this error
    pub fn scope(&self) -> FailureScope {
        match self {
            Self::Config { .. } => FailureScope::Run,
            Self::SourceRootMissing { .. } => FailureScope::Target,
            Self::TargetCreate { .. } => FailureScope::Subdirectory,
            Self::Io { .. }
            | Self::Delete { .. }
            | Self::Copy { .. }
            | Self::Prompt { .. }
            | Self::Other { .. } => FailureScope::File,
        }
    }

    /// Check if this error aborts the current target's pass (or more)
    pub fn is_fatal_for_target(&self) -> bool {
        self.scope() >= FailureScope::Target
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new target-directory creation error
    pub fn target_create<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::TargetCreate {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new deletion error
    pub fn delete<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Delete {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new copy error
    pub fn copy<P: Into<PathBuf>, S: Into<String>>(source: P, destination: P, message: S) -> Self {
        Self::Copy {
            source_path: source.into(),
            destination: destination.into(),
            message: message.into(),
        }
    }

    /// Create a new prompt error
    pub fn prompt<S: Into<String>>(message: S) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
