//! Configuration module for the asset picker
//!
//! Supports loading configuration from a TOML file.
//! Configuration is stored in a standard location:
//! - Windows: %APPDATA%\asset_picker\config.toml
//! - Linux: ~/.config/asset_picker/config.toml
//! - macOS: ~/Library/Application Support/asset_picker/config.toml
//!
//! The picker itself never writes configuration during a session; `save` and
//! `init_config` exist for the command-line host.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application name used for config directory
const APP_NAME: &str = "asset_picker";

/// Default config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Local override file name, checked in the current directory first
const LOCAL_CONFIG_FILE_NAME: &str = "asset_picker.toml";

/// Get the standard configuration directory for the application.
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Get the standard configuration file path.
///
/// Returns the full path to the config file in the standard location.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Ensure the configuration directory exists.
///
/// Creates the directory and all parent directories if they don't exist.
pub fn ensure_config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = get_config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .map_err(|e| ConfigError::WriteError(config_dir.clone(), e.to_string()))?;
    }

    Ok(config_dir)
}

/// Initialize the configuration file if it doesn't exist.
///
/// Creates the config directory and writes the default config template.
/// Returns the path to the config file.
pub fn init_config() -> Result<PathBuf, ConfigError> {
    let config_dir = ensure_config_dir()?;
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        fs::write(&config_path, Config::generate_default_config())
            .map_err(|e| ConfigError::WriteError(config_path.clone(), e.to_string()))?;
    }

    Ok(config_path)
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Picker presentation toggles
    pub picker: PickerConfig,

    /// Selection policy applied by the command-line host
    pub host: HostPolicy,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Presentation toggles for one picker session
///
/// Plain immutable configuration. The rendering surface reads these flags;
/// the selection core does not branch on them except for badge numbering and
/// album filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Show the cancel affordance
    pub shows_cancel_button: bool,

    /// List albums that have no assets after filtering
    pub shows_empty_albums: bool,

    /// Show the number of assets next to each album
    pub shows_number_of_assets: bool,

    /// Show "#n" selection-order badges instead of a plain checkmark
    pub shows_selection_index: bool,
}

/// Selection policy for the command-line host delegate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostPolicy {
    /// Maximum number of selected assets (0 = unlimited)
    pub max_selection: usize,

    /// Asset ids that are never enabled for selection
    pub disabled_assets: Vec<String>,

    /// Asset ids that may not be deselected once selected
    pub locked_assets: Vec<String>,

    /// Asset ids that refuse the transient highlight
    pub unhighlightable_assets: Vec<String>,

    /// Answer for "should scroll to bottom" (None = picker default)
    pub scroll_to_bottom: Option<bool>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Also write log lines to `log_file`
    pub log_to_file: bool,

    /// Path of the log file
    pub log_file: PathBuf,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            shows_cancel_button: true,
            shows_empty_albums: true,
            shows_number_of_assets: true,
            shows_selection_index: false,
        }
    }
}

impl PickerConfig {
    /// Set whether the cancel button is shown
    pub fn with_cancel_button(mut self, shows: bool) -> Self {
        self.shows_cancel_button = shows;
        self
    }

    /// Set whether empty albums are listed
    pub fn with_empty_albums(mut self, shows: bool) -> Self {
        self.shows_empty_albums = shows;
        self
    }

    /// Set whether album asset counts are shown
    pub fn with_number_of_assets(mut self, shows: bool) -> Self {
        self.shows_number_of_assets = shows;
        self
    }

    /// Set whether selection-order badges are shown
    pub fn with_selection_index(mut self, shows: bool) -> Self {
        self.shows_selection_index = shows;
        self
    }
}

impl HostPolicy {
    /// Check whether an id is listed as disabled
    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled_assets.iter().any(|d| d == id)
    }

    /// Check whether an id is listed as locked
    pub fn is_locked(&self, id: &str) -> bool {
        self.locked_assets.iter().any(|l| l == id)
    }

    /// Check whether an id refuses highlighting
    pub fn refuses_highlight(&self, id: &str) -> bool {
        self.unhighlightable_assets.iter().any(|u| u == id)
    }

    /// Check whether a selection of `count` assets has reached the cap
    pub fn is_at_capacity(&self, count: usize) -> bool {
        self.max_selection != 0 && count >= self.max_selection
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_file: false,
            log_file: PathBuf::from("./asset_picker.log"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;

        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./asset_picker.toml (current directory - for development/override)
    /// 2. Standard config location
    ///
    /// If no config file is found, returns default configuration.
    pub fn load_default() -> Result<Self, ConfigError> {
        let local = PathBuf::from(".").join(LOCAL_CONFIG_FILE_NAME);
        if local.exists() {
            return Self::load(&local);
        }

        if let Some(config_path) = get_config_path() {
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Get the path where the config file is (or would be) located.
    pub fn get_active_config_path() -> PathBuf {
        let local = PathBuf::from(".").join(LOCAL_CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }

        get_config_path().unwrap_or(local)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::WriteError(path.as_ref().to_path_buf(), e.to_string()))?;

        Ok(())
    }

    /// Generate a default config file with comments
    /// This uses the example config file to ensure it stays up to date
    pub fn generate_default_config() -> String {
        include_str!("../../config.example.toml").to_string()
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    /// Configuration file was not found at the specified path
    FileNotFound(PathBuf),
    /// Failed to read the configuration file
    ReadError(PathBuf, String),
    /// Failed to parse the configuration file (invalid TOML)
    ParseError(PathBuf, String),
    /// Failed to serialize configuration to TOML
    SerializeError(String),
    /// Failed to write configuration file
    WriteError(PathBuf, String),
    /// Could not determine config directory
    ConfigDirNotFound,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ReadError(path, err) => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    err
                )
            }
            ConfigError::ParseError(path, err) => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    err
                )
            }
            ConfigError::SerializeError(err) => {
                write!(f, "Failed to serialize configuration: {}", err)
            }
            ConfigError::WriteError(path, err) => {
                write!(
                    f,
                    "Failed to write config file '{}': {}",
                    path.display(),
                    err
                )
            }
            ConfigError::ConfigDirNotFound => {
                write!(f, "Could not determine configuration directory")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
