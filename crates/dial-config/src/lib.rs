//! Configuration management for the dial clock.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/dial/` on Linux). Every field has a default, so a partial or
//! missing file is fine.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dial_core::{AnimationKind, DEFAULT_STIFFNESS};
use dial_effects::DEFAULT_STAR_SEED;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_FRAME_RATE: u32 = 60;
pub const MIN_FRAME_RATE: u32 = 1;
pub const MAX_FRAME_RATE: u32 = 120;

/// Errors from reading or writing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not determine the config directory")]
    NoConfigDir,
}

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Animation drawn behind the face.
    pub animation: AnimationKind,
    /// Zone name: "system", "UTC" or a fixed offset like "+09:00".
    pub timezone: String,
    /// Target frames per second.
    pub frame_rate: u32,
    /// Seed for the cosmic stars layout.
    pub star_seed: u64,
    /// Stiffness of the second-hand spring.
    pub spring_stiffness: f32,
    pub show_numerals: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation: AnimationKind::None,
            timezone: "system".to_string(),
            frame_rate: DEFAULT_FRAME_RATE,
            star_seed: DEFAULT_STAR_SEED,
            spring_stiffness: DEFAULT_STIFFNESS,
            show_numerals: true,
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("", "", "dial").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from `path`, logging and falling back to defaults on error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|err| {
            warn!(error = %err, path = %path.display(), "ignoring unreadable config");
            Self::default()
        })
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Frame rate clamped to the supported range.
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE)
    }

    /// Time budget of a single frame.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate()
    }

    /// Spring stiffness, or the default when the stored value is unusable.
    pub fn spring_stiffness(&self) -> f32 {
        if self.spring_stiffness.is_finite() && self.spring_stiffness > 0.0 {
            self.spring_stiffness
        } else {
            DEFAULT_STIFFNESS
        }
    }
}
