//! Configuration for the neo digital rain.
//!
//! Settings are read from a TOML file. Every key is optional; anything left
//! out takes its default. The default file lives in the platform config
//! directory (`~/.config/neo/config.toml` on Linux) and may be absent.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use neo_core::{ClockSource, MAX_FADE_OPACITY};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "neo.log";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Where Vision mode reads its frames from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CameraSource {
    /// Built-in synthetic camera.
    #[default]
    Pattern,
    /// Image file, or directory of image files played in name order.
    Path(PathBuf),
}

impl From<String> for CameraSource {
    fn from(value: String) -> Self {
        if value == "pattern" {
            CameraSource::Pattern
        } else {
            CameraSource::Path(PathBuf::from(value))
        }
    }
}

impl From<CameraSource> for String {
    fn from(source: CameraSource) -> Self {
        source.to_string()
    }
}

impl fmt::Display for CameraSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraSource::Pattern => f.write_str("pattern"),
            CameraSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub source: CameraSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    /// Clip played once at startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<PathBuf>,
    /// Command used to play the clip.
    pub player: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            clip: None,
            player: "aplay".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub level: LogLevel,
}

impl LogConfig {
    /// Configured log file, falling back to the platform data directory.
    pub fn path(&self) -> Option<PathBuf> {
        self.file.clone().or_else(default_log_path)
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Frames per second.
    pub fps: u32,
    /// Virtual pixels per glyph cell.
    pub cell_size: u32,
    /// Terminal columns taken by one glyph cell.
    pub cell_width: u16,
    /// Global opacity the rain fade-in starts from.
    pub initial_opacity: u8,
    /// Blank entries appended to the alphabet.
    pub blank_glyphs: usize,
    pub clock: ClockSource,
    /// Pause after a mode switch, in milliseconds.
    pub settle_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub camera: CameraConfig,
    pub audio: AudioConfig,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            cell_size: 23,
            cell_width: 2,
            initial_opacity: 0,
            blank_glyphs: 10,
            clock: ClockSource::Frames,
            settle_ms: 100,
            seed: None,
            camera: CameraConfig::default(),
            audio: AudioConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// tried and defaults are used when nothing is there.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=240).contains(&self.fps) {
            return Err(ConfigError::Invalid(format!(
                "fps must be between 1 and 240, got {}",
                self.fps
            )));
        }
        if !(1..=255).contains(&self.cell_size) {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be between 1 and 255, got {}",
                self.cell_size
            )));
        }
        if !(1..=4).contains(&self.cell_width) {
            return Err(ConfigError::Invalid(format!(
                "cell_width must be between 1 and 4, got {}",
                self.cell_width
            )));
        }
        if self.initial_opacity > MAX_FADE_OPACITY {
            return Err(ConfigError::Invalid(format!(
                "initial_opacity must not exceed {MAX_FADE_OPACITY}, got {}",
                self.initial_opacity
            )));
        }
        if self.audio.player.trim().is_empty() {
            return Err(ConfigError::Invalid("audio.player must not be empty".to_string()));
        }
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "neo")
}

/// Default config file location.
pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Default log file location.
pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}
