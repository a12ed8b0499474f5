//! Configuration builder for flexible configuration loading

use crate::{Config, ConfigError, ConfigResult};
use config::{ConfigBuilder as ConfigBuilderInner, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Configuration builder for loading configuration from multiple sources
#[derive(Debug)]
pub struct ConfigBuilder {
    inner: ConfigBuilderInner<config::builder::DefaultState>,
    sources: Vec<ConfigSource>,
    env_prefix: Option<String>,
    env_separator: String,
}

#[derive(Debug, Clone)]
enum ConfigSource {
    File { path: PathBuf, format: FileFormat },
    Defaults,
    Environment { prefix: String },
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            inner: config::Config::builder(),
            sources: Vec::new(),
            env_prefix: None,
            env_separator: "__".to_string(),
        }
    }

    /// Add default configuration values
    pub fn add_defaults(mut self) -> Self {
        self.sources.push(ConfigSource::Defaults);
        self
    }

    /// Add a configuration file source
    pub fn add_source_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Self::detect_format(&path);
        self.sources.push(ConfigSource::File { path, format });
        self
    }

    /// Add environment variable source with prefix
    pub fn add_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        let prefix = prefix.into();
        self.env_prefix = Some(prefix.clone());
        self.sources.push(ConfigSource::Environment { prefix });
        self
    }

    /// Set environment variable separator (default: "__")
    pub fn env_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.env_separator = separator.into();
        self
    }

    /// Build the configuration
    ///
    /// Later sources override earlier ones. Duplicate target paths are
    /// folded into single entries before validation, so callers always
    /// receive a de-duplicated target list.
    pub fn build(mut self) -> ConfigResult<Config> {
        // Start with defaults as the base configuration
        let defaults = Config::default();

        let defaults_value = serde_yaml::to_value(&defaults)
            .map_err(|e| ConfigError::other(format!("Failed to serialize defaults: {}", e)))?;
        self.inner = self
            .inner
            .add_source(config::Config::try_from(&defaults_value)?);

        for source in &self.sources {
            match source {
                ConfigSource::File { path, format } => {
                    if path.exists() {
                        self.inner = self
                            .inner
                            .add_source(File::from(path.clone()).format(*format));
                    }
                }
                ConfigSource::Environment { prefix } => {
                    self.inner = self.inner.add_source(
                        Environment::with_prefix(prefix).separator(&self.env_separator),
                    );
                }
                ConfigSource::Defaults => {
                    // Already handled above
                }
            }
        }

        let config = self.inner.build()?;
        let mut result: Config = config.try_deserialize()?;

        result.normalize_targets();
        Self::validate(&result)?;

        Ok(result)
    }

    /// Try to build the configuration, returning defaults on error
    pub fn build_or_default(self) -> Config {
        self.build().unwrap_or_default()
    }

    /// Detect file format from extension
    fn detect_format(path: &Path) -> FileFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Yaml, // Default to YAML
        }
    }

    /// Validate the configuration
    fn validate(config: &Config) -> ConfigResult<()> {
        if config.source.as_os_str().is_empty() {
            return Err(ConfigError::missing_required("source"));
        }

        if config.targets.is_empty() {
            return Err(ConfigError::missing_required("targets"));
        }

        for target in &config.targets {
            if target.path.as_os_str().is_empty() {
                return Err(ConfigError::validation(
                    "Target path must not be empty",
                ));
            }
        }

        if !["trace", "debug", "info", "warn", "error"].contains(&config.logging.level.as_str()) {
            return Err(ConfigError::validation(
                "Log level must be one of: trace, debug, info, warn, error",
            ));
        }

        Ok(())
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
