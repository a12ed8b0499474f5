//! Latest-file selection and target synchronization for stagesync
//!
//! This crate implements the core of stagesync:
//!
//! - **Version filter**: Does a filename carry a recognizable version token?
//! - **Latest-set selection**: All files in a subdirectory sharing the
//!   maximum modification timestamp, ties included
//! - **Retention planning**: Which existing target files are stale and due
//!   for deletion
//! - **Overwrite arbitration**: Proceed or skip when the destination file
//!   already exists, delegating to an injected decision provider
//! - **Sync driver**: The per-target pass over every source subdirectory,
//!   with per-file failure isolation and structured reports
//!
//! # Examples
//!
//! ```rust,no_run
//! use stagesync_engine::{AutoProceed, SyncDriver, SyncOptions, SyncRequest};
//!
//! # async fn example() -> stagesync_types::Result<()> {
//! let mut decider = AutoProceed;
//! let mut driver = SyncDriver::new(&mut decider);
//! let request = SyncRequest::new("releases", "staging")
//!     .with_options(SyncOptions { clean_old: true, ..SyncOptions::default() });
//! let result = driver.sync(request).await?;
//! println!("{} files written", result.stats.files_written());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod arbiter;
pub mod driver;
pub mod retain;
pub mod select;
pub mod version;

pub use arbiter::{decide, AutoProceed, AutoSkip, ConfirmProvider, OverwriteDecision};
pub use driver::{SyncDriver, SyncOptions, SyncRequest, SyncResult};
pub use retain::{list_plain_files, plan_deletions};
pub use select::select_latest;
pub use version::has_version_token;
