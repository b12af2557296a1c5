//! # configs
//!
//! Layered settings for TrendWatch: built-in defaults, then an optional
//! `trendwatch.{toml,yaml,json}` file, then `TRENDWATCH__SECTION__KEY`
//! environment variables (a `.env` file is loaded first if present).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "TRENDWATCH";
pub const CONFIG_FILE: &str = "trendwatch";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sqlite,
    Mongo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Reddit,
    Youtube,
    Crawl,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub storage: StorageSettings,
    pub source: SourceSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    /// Backend selected at startup
    pub backend: Backend,
    /// SQLite file path or `sqlite:` URL
    pub sqlite_path: String,
    /// May carry credentials, so it never shows up in Debug output
    pub mongo_uri: SecretString,
    pub mongo_database: String,
}

#[derive(Debug, Deserialize)]
pub struct SourceSettings {
    /// Source selected at startup
    pub kind: SourceKind,
    pub subreddit: String,
    pub region: String,
    pub crawl_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// Default filter directive; `RUST_LOG` wins when set
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Settings {
    /// Loads the optional config file and the process environment. Call
    /// [`load_dotenv`] first so `.env` entries are visible here.
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_sources(
            Some(CONFIG_FILE),
            Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true),
        )
    }

    /// Builds settings from an optional file stem and an environment source.
    pub fn from_sources(file: Option<&str>, env: Environment) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("storage.backend", "sqlite")?
            .set_default("storage.sqlite_path", "trends.db")?
            .set_default("storage.mongo_uri", "mongodb://localhost:27017")?
            .set_default("storage.mongo_database", "trendwatch")?
            .set_default("source.kind", "reddit")?
            .set_default("source.subreddit", "news")?
            .set_default("source.region", "US")?
            .set_default("source.crawl_url", "https://news.ycombinator.com/")?
            .set_default("source.timeout_secs", 10)?
            .set_default("source.user_agent", "TrendWatchScraper/1.0")?
            .set_default("log.level", "info")?
            .set_default("log.json", false)?;

        if let Some(file) = file {
            builder = builder.add_source(File::with_name(file).required(false));
        }

        Ok(builder.add_source(env).build()?.try_deserialize()?)
    }
}

/// What happened when looking for a `.env` file. Settings are read before
/// logging is set up, so the caller logs this once a subscriber exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvOutcome {
    Loaded(PathBuf),
    Missing,
    Unreadable(String),
}

impl DotenvOutcome {
    fn from_result(result: dotenvy::Result<PathBuf>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(e) if e.not_found() => Self::Missing,
            Err(e) => Self::Unreadable(e.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            Self::Loaded(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Self::Missing => {}
            Self::Unreadable(error) => tracing::warn!(%error, "ignoring unreadable .env"),
        }
    }
}

/// Loads `.env` from the working directory or one of its parents into the
/// process environment.
pub fn load_dotenv() -> DotenvOutcome {
    DotenvOutcome::from_result(dotenvy::dotenv())
}

/// Loads a specific env file into the process environment.
pub fn load_dotenv_from(path: &Path) -> DotenvOutcome {
    DotenvOutcome::from_result(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}
