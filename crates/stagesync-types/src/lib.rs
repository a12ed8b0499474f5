//! Core type system and error handling for stagesync
//!
//! This crate provides the foundational types shared by the stagesync crates:
//!
//! - **Error handling**: Structured error types with a failure-scope
//!   classification that encodes how far an error is allowed to propagate
//! - **Core types**: Candidate files, latest-set selection results,
//!   per-file outcomes and per-subdirectory reports
//! - **Statistics**: Aggregate counters for a synchronization pass
//!
//! # Features
//!
//! - `serde`: Enable serialization support for reports and statistics
//!
//! # Examples
//!
//! ```rust
//! use stagesync_types::{Result, SyncStats};
//!
//! fn example_pass() -> Result<SyncStats> {
//!     let mut stats = SyncStats::new();
//!     stats.files_copied = 3;
//!     Ok(stats)
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod result;
pub mod types;

// Re-export commonly used types
pub use error::{Error, ErrorKind, FailureScope};
pub use result::Result;
pub use types::*;
