//! Layered configuration using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. User config: `<config_dir>/quicknotes/config.toml`
//! 3. Project config: `.quicknotes.toml` in the working directory
//! 4. Explicit file passed by the host (`--config`)
//! 5. Environment variables: `QUICKNOTES_*` (e.g. `QUICKNOTES_STORAGE_KEY`)
//!
//! ```toml
//! storage_key = "quicknotes.notes.v1"
//! db_path = "/home/me/.local/share/quicknotes/notes.sqlite3"
//! locale = "en-GB"
//! utc_offset_minutes = 60
//! log_level = "info"
//! id_strategy = "uuid"
//! ```

use crate::model::note::IdStrategy;
use crate::render::{DateFormat, DateStyle};
use crate::storage::DEFAULT_STORAGE_KEY;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "quicknotes";
const PROJECT_CONFIG_FILE: &str = ".quicknotes.toml";
const DB_FILE_NAME: &str = "notes.sqlite3";
const DEFAULT_LOCALE: &str = "en-US";

/// Configuration loading failure.
#[derive(Debug)]
pub enum ConfigError {
    /// Boxed to keep `Result<NotesConfig, ConfigError>` small.
    Figment(Box<figment::Error>),
    MissingFile(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Figment(err) => write!(f, "{err}"),
            Self::MissingFile(path) => write!(f, "config file not found: `{}`", path.display()),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Figment(err) => Some(err.as_ref()),
            Self::MissingFile(_) => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Figment(Box::new(value))
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Slot key holding the serialized note list.
    pub storage_key: String,
    /// SQLite file backing the slot store.
    pub db_path: PathBuf,
    /// Locale tag selecting the date label style.
    pub locale: String,
    /// Fixed UTC offset for date labels; local time zone when unset.
    pub utc_offset_minutes: Option<i32>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Rolling log directory; file logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub id_strategy: IdStrategy,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            db_path: default_db_path(),
            locale: DEFAULT_LOCALE.to_string(),
            utc_offset_minutes: None,
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: None,
            id_strategy: IdStrategy::default(),
        }
    }
}

impl NotesConfig {
    /// Loads config with layered resolution (defaults → user → project → explicit → env).
    pub fn load(explicit_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(explicit_file)?)
    }

    /// Builds the provider stack without extracting it.
    pub fn figment(explicit_file: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(user_config_path()))
            .merge(Toml::file(PROJECT_CONFIG_FILE));

        if let Some(path) = explicit_file {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.merge(Env::prefixed("QUICKNOTES_")))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(ConfigError::from)
    }

    /// Date label format from `locale` and `utc_offset_minutes`.
    ///
    /// An out-of-range offset falls back to the local time zone.
    pub fn date_format(&self) -> DateFormat {
        let style = DateStyle::for_locale(&self.locale);
        match self.utc_offset_minutes {
            None => DateFormat::local(style),
            Some(minutes) => DateFormat::with_offset_minutes(style, minutes).unwrap_or_else(|| {
                warn!(
                    "event=config_load module=config status=invalid field=utc_offset_minutes value={}",
                    minutes
                );
                DateFormat::local(style)
            }),
        }
    }
}

/// `<config_dir>/quicknotes/config.toml`, preferring `~/.config` when present.
fn user_config_path() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        let xdg_path = home.join(".config").join(APP_DIR).join("config.toml");
        if xdg_path.exists() {
            return xdg_path;
        }
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join("config.toml"))
        .unwrap_or_default()
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}
