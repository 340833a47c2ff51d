//! Configuration management.
//!
//! Defaults, overridden by a TOML file, overridden by `HAVEN_*` environment
//! variables. The file is looked up in order at `--config`,
//! `HAVEN_CONFIG_PATH`, the platform config dir, and `~/.config/haven/`.

use crate::services::DEFAULT_MATCH_CUTOFF;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "haven.db";
/// Knowledge-base file name inside the data directory.
pub const KNOWLEDGE_BASE_FILE: &str = "knowledge_base.json";
/// Log file name inside the data directory.
pub const LOG_FILE: &str = "haven.log";

/// Main configuration for haven.
#[derive(Debug, Clone)]
pub struct HavenConfig {
    /// Directory holding the database, knowledge base, and logs.
    pub data_dir: PathBuf,
    /// Database file; defaults to `<data_dir>/haven.db`.
    pub database_path: Option<PathBuf>,
    /// Knowledge-base document; defaults to `<data_dir>/knowledge_base.json`.
    pub knowledge_base_path: Option<PathBuf>,
    /// Minimum similarity for a knowledge-base hit.
    pub match_cutoff: f64,
    /// Chat shell settings.
    pub chat: ChatSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Chat shell settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    /// Chance of a resource follow-up after each reply.
    pub suggestion_probability: f64,
    /// Delay before a reply is shown.
    pub reply_delay_ms: u64,
    /// Delay before a resource follow-up is shown.
    pub suggestion_delay_ms: u64,
    /// Delay between the farewell and exit.
    pub quit_delay_ms: u64,
    /// Force colour on or off; `None` detects a terminal.
    pub color: Option<bool>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            suggestion_probability: 0.3,
            reply_delay_ms: 500,
            suggestion_delay_ms: 1500,
            quit_delay_ms: 2000,
            color: None,
        }
    }
}

impl ChatSettings {
    /// Settings with every delay removed.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            reply_delay_ms: 0,
            suggestion_delay_ms: 0,
            quit_delay_ms: 0,
            ..Self::default()
        }
    }
}

/// Logging settings from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `haven=debug`.
    pub level: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Log file path.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Database path.
    pub database_path: Option<String>,
    /// Knowledge-base path.
    pub knowledge_base_path: Option<String>,
    /// Knowledge-base similarity cutoff.
    pub match_cutoff: Option<f64>,
    /// Chat section.
    pub chat: Option<ConfigFileChat>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// Chat section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileChat {
    /// Suggestion probability.
    pub suggestion_probability: Option<f64>,
    /// Reply delay.
    pub reply_delay_ms: Option<u64>,
    /// Suggestion delay.
    pub suggestion_delay_ms: Option<u64>,
    /// Quit delay.
    pub quit_delay_ms: Option<u64>,
    /// Colour override.
    pub color: Option<bool>,
}

impl Default for HavenConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_path: None,
            knowledge_base_path: None,
            match_cutoff: DEFAULT_MATCH_CUTOFF,
            chat: ChatSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl HavenConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value
    /// is out of range.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or a value is out of range.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| Error::op("parse_config_file", e))?;
        let config = Self::from_config_file(file);
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the platform config dir, then `~/.config/haven/`. Returns
    /// defaults if neither has a config file; a broken file is logged and
    /// ignored.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("haven").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("haven")
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                },
            }
        }

        Self::default()
    }

    /// Applies `HAVEN_DATA_DIR`, `HAVEN_DB_PATH`, and `HAVEN_KNOWLEDGE_BASE`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = non_empty_env("HAVEN_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = non_empty_env("HAVEN_DB_PATH") {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(path) = non_empty_env("HAVEN_KNOWLEDGE_BASE") {
            self.knowledge_base_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Converts a `ConfigFile` to `HavenConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        config.database_path = file.database_path.map(PathBuf::from);
        config.knowledge_base_path = file.knowledge_base_path.map(PathBuf::from);
        if let Some(cutoff) = file.match_cutoff {
            config.match_cutoff = cutoff;
        }
        if let Some(chat) = file.chat {
            if let Some(p) = chat.suggestion_probability {
                config.chat.suggestion_probability = p;
            }
            if let Some(ms) = chat.reply_delay_ms {
                config.chat.reply_delay_ms = ms;
            }
            if let Some(ms) = chat.suggestion_delay_ms {
                config.chat.suggestion_delay_ms = ms;
            }
            if let Some(ms) = chat.quit_delay_ms {
                config.chat.quit_delay_ms = ms;
            }
            config.chat.color = chat.color;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first out-of-range value.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.match_cutoff) {
            return Err(Error::InvalidInput(format!(
                "match_cutoff must be within 0..=1, got {}",
                self.match_cutoff
            )));
        }
        if !(0.0..=1.0).contains(&self.chat.suggestion_probability) {
            return Err(Error::InvalidInput(format!(
                "chat.suggestion_probability must be within 0..=1, got {}",
                self.chat.suggestion_probability
            )));
        }
        Ok(())
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Resolved database path.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DATABASE_FILE))
    }

    /// Resolved knowledge-base path.
    #[must_use]
    pub fn knowledge_base_path(&self) -> PathBuf {
        self.knowledge_base_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(KNOWLEDGE_BASE_FILE))
    }

    /// Default log file for the interactive shell.
    #[must_use]
    pub fn default_log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

/// Platform data directory for haven, or `.haven` if there is no home.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "haven").map_or_else(
        || PathBuf::from(".haven"),
        |dirs| dirs.data_local_dir().to_path_buf(),
    )
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
