use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

/// Time limits offered by the selector, in seconds.
pub const TIME_LIMITS: &[u32] = &[15, 30, 60, 120];

pub const DEFAULT_THEME: &str = "cyber";
pub const DEFAULT_TIME_SECS: u32 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User preferences persisted between runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_time", deserialize_with = "deserialize_time")]
    pub time: u32,
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}
fn default_time() -> u32 {
    DEFAULT_TIME_SECS
}

/// Accepts `time = 30` as well as `time = "30"`. Anything else maps to 0,
/// which `validate` replaces with the default.
fn deserialize_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTime {
        Int(i64),
        Text(String),
        Other(IgnoredAny),
    }

    let secs = match RawTime::deserialize(deserializer)? {
        RawTime::Int(n) => u32::try_from(n).unwrap_or(0),
        RawTime::Text(s) => s.trim().parse().unwrap_or(0),
        RawTime::Other(_) => 0,
    };
    Ok(secs)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            time: default_time(),
        }
    }
}

impl Config {
    /// Replace values outside the supported set with defaults.
    /// Call after deserialization; stale or hand-edited files land here.
    pub fn validate(&mut self, known_themes: &[String]) {
        if !TIME_LIMITS.contains(&self.time) {
            warn!(time = self.time, "unsupported time limit, using default");
            self.time = default_time();
        }
        if !known_themes.iter().any(|t| *t == self.theme) {
            warn!(theme = %self.theme, "unknown theme, using default");
            self.theme = default_theme();
        }
    }

    /// The selector value after `current`, wrapping around.
    pub fn next_time_limit(current: u32) -> u32 {
        let idx = TIME_LIMITS.iter().position(|&t| t == current);
        match idx {
            Some(i) => TIME_LIMITS[(i + 1) % TIME_LIMITS.len()],
            None => TIME_LIMITS[0],
        }
    }
}

/// Location of the preferences file on disk.
#[derive(Clone, Debug)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keysprint")
            .join("config.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file, or defaults when it does not exist yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content).map_err(io_err)
    }

    pub fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }
}
