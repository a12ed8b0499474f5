//! Configuration management for stagesync
//!
//! This crate provides the configuration system for stagesync, supporting
//! multiple configuration formats (YAML, TOML, JSON), validation and
//! environment variable overrides.
//!
//! A configuration names one source directory and an ordered list of targets;
//! each target carries its own option set. Duplicate target paths in the raw
//! input are merge events, not duplicates: the later occurrence's options win
//! and the engine only ever receives a de-duplicated list.
//!
//! # Examples
//!
//! ```rust,no_run
//! use stagesync_config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .add_defaults()
//!     .add_source_file("stagesync.yaml")
//!     .add_env_prefix("STAGESYNC")
//!     .build()
//!     .expect("Failed to load configuration");
//!
//! println!("Source: {}", config.source.display());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Main configuration structure for stagesync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source directory containing per-project subdirectories
    #[serde(default)]
    pub source: PathBuf,
    /// Ordered list of synchronization targets
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    /// Latest-file selection configuration
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Interactive prompt configuration
    #[serde(default)]
    pub prompt: PromptConfig,
    /// Console behavior configuration
    #[serde(default)]
    pub console: ConsoleConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            targets: Vec::new(),
            selection: SelectionConfig::default(),
            prompt: PromptConfig::default(),
            console: ConsoleConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Fold duplicate target paths into single entries
    ///
    /// The raw configuration may name the same target path more than once.
    /// The first occurrence keeps its position in the list; the options of
    /// the later occurrence win.
    pub fn normalize_targets(&mut self) {
        let mut merged: Vec<TargetSpec> = Vec::new();
        for target in self.targets.drain(..) {
            if let Some(existing) = merged.iter_mut().find(|t| t.path == target.path) {
                existing.options = target.options;
            } else {
                merged.push(target);
            }
        }
        self.targets = merged;
    }
}

/// One configured synchronization destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Destination directory path; identity of the target
    pub path: PathBuf,
    /// Per-target option set
    #[serde(default)]
    pub options: TargetOptions,
}

impl TargetSpec {
    /// Create a target with default options
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            options: TargetOptions::default(),
        }
    }

    /// Set the clean-old option
    pub fn with_clean_old(mut self, clean_old: bool) -> Self {
        self.options.clean_old = clean_old;
        self
    }
}

/// Per-target option set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetOptions {
    /// Remove stale files from target subdirectories after a successful pass
    #[serde(default)]
    pub clean_old: bool,
}

/// Latest-file selection configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Restrict selection to filenames containing a version token
    #[serde(default = "default_version_filter")]
    pub version_filter: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            version_filter: default_version_filter(),
        }
    }
}

/// Interactive prompt configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Ask before overwriting an existing destination file
    #[serde(default = "default_confirm_overwrite")]
    pub confirm_overwrite: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            confirm_overwrite: default_confirm_overwrite(),
        }
    }
}

/// Console behavior configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Print the intro banner before processing
    #[serde(default = "default_banner")]
    pub banner: bool,
    /// Wait for a keypress before the process exits
    #[serde(default)]
    pub wait_on_exit: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            banner: default_banner(),
            wait_on_exit: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable colored output
    #[serde(default = "default_colored_output")]
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            colored_output: default_colored_output(),
        }
    }
}

fn default_version_filter() -> bool {
    true
}

fn default_confirm_overwrite() -> bool {
    true
}

fn default_banner() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_colored_output() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.targets.is_empty());
        assert!(config.selection.version_filter);
        assert!(config.prompt.confirm_overwrite);
        assert!(!config.console.wait_on_exit);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_normalize_targets_merges_duplicates() {
        let mut config = Config::default();
        config.targets = vec![
            TargetSpec::new("/mnt/backup"),
            TargetSpec::new("/mnt/mirror").with_clean_old(true),
            TargetSpec::new("/mnt/backup").with_clean_old(true),
        ];

        config.normalize_targets();

        assert_eq!(config.targets.len(), 2);
        // First occurrence keeps its position, later options win.
        assert_eq!(config.targets[0].path, PathBuf::from("/mnt/backup"));
        assert!(config.targets[0].options.clean_old);
        assert_eq!(config.targets[1].path, PathBuf::from("/mnt/mirror"));
        assert!(config.targets[1].options.clean_old);
    }

    #[test]
    fn test_normalize_targets_preserves_order() {
        let mut config = Config::default();
        config.targets = vec![
            TargetSpec::new("/a"),
            TargetSpec::new("/b"),
            TargetSpec::new("/c"),
        ];

        config.normalize_targets();

        let paths: Vec<_> = config.targets.iter().map(|t| t.path.clone()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/c")]
        );
    }

    #[test]
    fn test_minimal_yaml_deserializes_with_defaults() {
        let yaml = r#"
source: /releases
targets:
  - path: /mnt/backup
  - path: /mnt/mirror
    options:
      clean_old: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.source, PathBuf::from("/releases"));
        assert_eq!(config.targets.len(), 2);
        assert!(!config.targets[0].options.clean_old);
        assert!(config.targets[1].options.clean_old);
        assert!(config.selection.version_filter);
    }
}
