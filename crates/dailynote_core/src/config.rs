//! Generator configuration.
//!
//! # Responsibility
//! - Describe where notes live and how generation and polling behave.
//! - Load settings from a JSON file, falling back to defaults per field.
//!
//! # Invariants
//! - A validated config always has a non-empty extension without a dot, a
//!   positive window, a positive poll interval and `start_hour < 24`.

use crate::repo::note_index::{NoteIndex, DEFAULT_NOTE_EXTENSION};
use crate::service::note_generator::{NoteGenerator, DEFAULT_WINDOW_DAYS};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding `notes_dir`.
pub const NOTES_DIR_ENV: &str = "DAILYNOTE_DIR";

const DEFAULT_START_HOUR: u32 = 6;
const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Settings shared by one-shot generation and the polling driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory holding `YYYY-MM-DD.<extension>` notes.
    pub notes_dir: PathBuf,
    /// Plain-text note extension, without the leading dot.
    pub extension: String,
    /// Days looked back for unfinished todos.
    pub window_days: u32,
    /// First local hour at which polling creates today's note.
    pub start_hour: u32,
    pub check_interval_secs: u64,
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files; see [`Self::resolved_log_dir`].
    pub log_dir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            notes_dir: default_notes_dir(),
            extension: DEFAULT_NOTE_EXTENSION.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            start_hour: DEFAULT_START_HOUR,
            check_interval_secs: DEFAULT_CHECK_INTERVAL_SECS,
            log_level: None,
            log_dir: None,
        }
    }
}

impl GeneratorConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
        Self::from_json_str(&json)
    }

    /// Applies `DAILYNOTE_DIR` when set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(NOTES_DIR_ENV).filter(|value| !value.is_empty()) {
            self.notes_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let extension = self.extension.trim();
        if extension.is_empty() || extension != self.extension {
            return Err(ConfigError::Invalid(
                "extension must be non-empty without surrounding whitespace".to_string(),
            ));
        }
        if extension.contains('.') || extension.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "extension `{extension}` must not contain `.` or `/`"
            )));
        }
        if self.window_days == 0 {
            return Err(ConfigError::Invalid("window_days must be at least 1".to_string()));
        }
        if self.start_hour >= 24 {
            return Err(ConfigError::Invalid(format!(
                "start_hour {} is out of range 0..=23",
                self.start_hour
            )));
        }
        if self.check_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "check_interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// `log_dir` when set, otherwise `$HOME/.dailynote/logs`.
    ///
    /// The default stays outside `notes_dir` so logging never creates or
    /// touches the vault.
    pub fn resolved_log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }
        match home_dir() {
            Some(home) => home.join(".dailynote").join("logs"),
            None => std::env::temp_dir().join("dailynote-logs"),
        }
    }

    /// Builds a generator honoring extension and window settings.
    pub fn note_generator(&self) -> NoteGenerator {
        NoteGenerator::new(NoteIndex::new(self.extension.clone()))
            .with_window_days(self.window_days)
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn default_notes_dir() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ObsidianVault")
        .join("DailyNotes")
}
