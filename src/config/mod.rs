//! Bundler configuration.
//!
//! Settings come from the command line and, optionally, from a TOML file
//! passed with `--config`. Command-line flags always win over file values.
//!
//! ```toml
//! gzip = 6        # 1-9, 0 disables compression (default: 0)
//! svgo = false    # optimize inline SVG markup (default: true)
//! verbose = true  # debug logging (default: false)
//! ```

mod error;

pub use error::ConfigError;

use crate::{cli::Cli, log};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Highest gzip level accepted by the compressor.
pub const MAX_GZIP_LEVEL: u32 = 9;

/// Values that may be provided by the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gzip: Option<u32>,
    pub svgo: Option<bool>,
    pub verbose: Option<bool>,
}

impl FileConfig {
    /// Parse config file content, warning about unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let deserializer = toml::Deserializer::new(content);
        let mut ignored = Vec::new();
        let config: Self = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        for key in ignored {
            log!("warn"; "unknown config key `{}` ignored", key);
        }
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse(&content)
    }
}

/// Resolved settings for one bundling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    /// Directory holding the referenced assets.
    pub asset_dir: PathBuf,
    /// Glob selecting the HTML documents.
    pub html_glob: String,
    /// Gzip level, `None` when compression is disabled.
    pub gzip: Option<u32>,
    /// Run the inline SVG pass.
    pub svgo: bool,
    /// Debug logging.
    pub verbose: bool,
}

impl BundleConfig {
    /// Build the configuration from CLI arguments and the optional config file.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    fn merge(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let level = cli.gzip.or(file.gzip).unwrap_or(0);
        if level > MAX_GZIP_LEVEL {
            return Err(ConfigError::Validation(format!(
                "gzip level must be between 0 and {MAX_GZIP_LEVEL}, got {level}"
            )));
        }

        Ok(Self {
            asset_dir: cli.asset_dir.clone(),
            html_glob: cli.html_glob.clone(),
            gzip: (level > 0).then_some(level),
            svgo: cli.svgo.or(file.svgo).unwrap_or(true),
            verbose: cli.verbose || file.verbose.unwrap_or(false),
        })
    }

    /// Create a configuration with defaults (no compression, SVG pass on).
    #[cfg(test)]
    pub fn new(asset_dir: impl Into<PathBuf>, html_glob: impl Into<String>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            html_glob: html_glob.into(),
            gzip: None,
            svgo: true,
            verbose: false,
        }
    }
}
