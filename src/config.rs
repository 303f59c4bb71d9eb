//! Export configuration
//!
//! Read from a RON file. Every field has a default, so an empty `()` file
//! (or no file at all) gives the standard behavior.
//!
//! ```text
//! (
//!   delimiter: '.',
//!   non_finite: Reject,
//!   compress: false,
//!   verify: true,
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directory name under the platform config directory
pub const APP_DIR: &str = "world-exporter";
/// Default config file name
pub const CONFIG_FILE: &str = "config.ron";

/// What to do with NaN/Inf in node transforms or light energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NonFinitePolicy {
    /// Skip the node with an `InvalidTransform` diagnostic
    #[default]
    Reject,
    /// Emit the value as-is (`inf`, `NaN`)
    PassThrough,
}

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid name delimiter {0:?} (must be punctuation)")]
    InvalidDelimiter(char),
}

/// Settings for one export pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Separator between the category prefix and subtype in node names
    pub delimiter: char,
    /// Handling of non-finite transform values
    pub non_finite: NonFinitePolicy,
    /// Brotli-compress written world files
    pub compress: bool,
    /// Parse the rendered document back before writing it
    pub verify: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: '.',
            non_finite: NonFinitePolicy::Reject,
            compress: false,
            verify: false,
        }
    }
}

impl ExportConfig {
    /// Parse a config from a RON string
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: ExportConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }

    /// Load the explicit config if given, else the default config file if it
    /// exists, else the built-in defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => {
                log::debug!("using config {}", path.display());
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.delimiter.is_ascii_punctuation() {
            return Err(ConfigError::InvalidDelimiter(self.delimiter));
        }
        Ok(())
    }
}

/// `<config_dir>/world-exporter/config.ron`, when the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
