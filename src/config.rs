use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};
use tracing_subscriber::filter::LevelFilter;

use crate::error::ConfigError;
use crate::game::{MAX_WIDTH, MIN_WIDTH};

/// Board settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width used when none is given on the command line
    pub width: usize,
    /// Ask for the width at startup in plain mode
    pub prompt_for_width: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 7,
            prompt_for_width: true,
        }
    }
}

/// Which front end drives the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    #[default]
    Tui,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub mode: UiMode,
    pub color: bool,
    /// Clear the terminal before every redraw in plain mode
    pub clear_screen: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            mode: UiMode::Tui,
            color: true,
            clear_screen: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of "off", "error", "warn", "info", "debug", "trace"
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "off".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.level).map_err(|_| {
            ConfigError::Validation(format!("logging.level '{}' is not a log level", self.level))
        })
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file was missing
    Defaults,
}

/// Log how the configuration at `path` was obtained.
pub fn report_source(path: &Path, source: ConfigSource) {
    match source {
        ConfigSource::File => debug!(path = %path.display(), "config file loaded"),
        ConfigSource::Defaults => {
            warn!(path = %path.display(), "config file not found, using defaults")
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    ///
    /// Logging is usually configured from the result, so the fallback is
    /// returned as a `ConfigSource` for `report_source` to log afterwards.
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if path.exists() {
            Ok((Self::load(path)?, ConfigSource::File))
        } else {
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.game.width) {
            return Err(ConfigError::Validation(format!(
                "game.width must be in [{MIN_WIDTH}, {MAX_WIDTH}]"
            )));
        }
        self.logging.level_filter()?;
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
