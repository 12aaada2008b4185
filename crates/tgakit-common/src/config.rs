//! Configuration for the tgakit command-line front end.
//!
//! Supports TOML deserialization with defaults for every field, so a
//! config file only needs to name the values it changes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest width or height a TGA header can record.
pub const MAX_DIMENSION: usize = u16::MAX as usize;

/// Top-level tgakit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    /// Destination file for the encoded image.
    pub output: PathBuf,

    /// Image width in pixels.
    pub width: usize,

    /// Image height in pixels.
    pub height: usize,

    /// Test pattern to generate.
    pub pattern: PatternKind,

    /// Fill colour (solid) or foreground colour (checkerboard), as RGB.
    pub color: [u8; 3],

    /// Checkerboard cell edge in pixels.
    pub cell_size: usize,

    /// How many times the same image is written.
    pub repeat: u32,

    /// Writes slower than this are reported as warnings.
    #[serde(with = "humantime_serde")]
    pub slow_write_threshold: Duration,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("out.tga"),
            width: 256,
            height: 256,
            pattern: PatternKind::Gradient,
            color: [255, 255, 255],
            cell_size: 16,
            repeat: 1,
            slow_write_threshold: Duration::from_millis(250),
        }
    }
}

/// Generated test patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Red ramps left to right, green ramps top to bottom.
    #[default]
    Gradient,
    /// Alternating cells of the configured colour and black.
    Checkerboard,
    /// Every pixel the configured colour.
    Solid,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gradient => write!(f, "gradient"),
            Self::Checkerboard => write!(f, "checkerboard"),
            Self::Solid => write!(f, "solid"),
        }
    }
}

impl KitConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Serialize configuration to TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Check values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::Invalid(format!(
                "dimensions {}x{} exceed {MAX_DIMENSION}",
                self.width, self.height
            )));
        }
        if self.repeat == 0 {
            return Err(ConfigError::Invalid("repeat must be at least 1".into()));
        }
        if self.cell_size == 0 {
            return Err(ConfigError::Invalid("cell_size must be at least 1".into()));
        }
        Ok(())
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Serde helper module for `Duration` using humantime format.
mod humantime_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = humantime::format_duration(*duration).to_string();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
