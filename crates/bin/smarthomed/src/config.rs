//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `smarthome.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use serde::Deserialize;
use smarthome_domain::action_log::ActionLogger;
use smarthome_domain::device::DeviceKind;
use smarthome_domain::error::HomeError;
use smarthome_domain::room::Room;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playlist persistence settings.
    pub playlist: PlaylistConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Action log settings.
    pub action_log: ActionLogConfig,
    /// The two rooms and their devices, in the order bulk commands visit them.
    pub rooms: Vec<RoomConfig>,
}

/// Playlist file configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    /// Path of the persisted playlist.
    pub path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Action log configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActionLogConfig {
    /// Maximum number of entries kept; unbounded when absent.
    pub capacity: Option<usize>,
}

/// One room and the kinds of device it holds.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomConfig {
    pub name: String,
    #[serde(default = "default_devices")]
    pub devices: Vec<DeviceKind>,
}

impl Config {
    /// Load configuration from `smarthome.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("smarthome.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SMARTHOME_PLAYLIST") {
            self.playlist.path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("SMARTHOME_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rooms.len() != 2 {
            return Err(ConfigError::Validation(format!(
                "exactly two rooms are required, found {}",
                self.rooms.len()
            )));
        }
        let mut seen = HashSet::new();
        for room in &self.rooms {
            if room.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "room names must not be empty".to_string(),
                ));
            }
            if !seen.insert(room.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "room {:?} is declared twice",
                    room.name
                )));
            }
        }
        if self.action_log.capacity == Some(0) {
            return Err(ConfigError::Validation(
                "action log capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the two configured rooms, every device switched off.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] unless exactly two rooms are
    /// configured, or [`ConfigError::Room`] if a room lists the same kind twice.
    pub fn build_rooms(&self) -> Result<[Room; 2], ConfigError> {
        let [first, second] = self.rooms.as_slice() else {
            return Err(ConfigError::Validation(format!(
                "exactly two rooms are required, found {}",
                self.rooms.len()
            )));
        };
        Ok([first.build()?, second.build()?])
    }

    /// Create the action log with the configured capacity.
    #[must_use]
    pub fn action_logger(&self) -> ActionLogger {
        self.action_log
            .capacity
            .and_then(NonZeroUsize::new)
            .map_or_else(ActionLogger::new, ActionLogger::bounded)
    }
}

impl RoomConfig {
    fn build(&self) -> Result<Room, HomeError> {
        Room::builder()
            .name(&self.name)
            .devices(self.devices.iter().cloned())
            .build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playlist: PlaylistConfig::default(),
            logging: LoggingConfig::default(),
            action_log: ActionLogConfig::default(),
            rooms: vec![
                RoomConfig {
                    name: "Living Room".to_string(),
                    devices: default_devices(),
                },
                RoomConfig {
                    name: "Kitchen".to_string(),
                    devices: default_devices(),
                },
            ],
        }
    }
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("playlist.txt"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthomed=info,smarthome=info".to_string(),
        }
    }
}

fn default_devices() -> Vec<DeviceKind> {
    vec![
        DeviceKind::Light,
        DeviceKind::AirConditioner,
        DeviceKind::Speaker,
    ]
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// A configured room could not be built.
    #[error("invalid room")]
    Room(#[from] HomeError),
}
