//! # Session Configuration
//!
//! Where the store lives, which user the session runs for, how loud to log.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PRISM_DB_PATH=/var/lib/prism/prism.db                              │
//! │     PRISM_USER_ID=user-123                                             │
//! │     PRISM_LOG=debug                                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/prism/prism.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.prism.prism/prism.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! database_path = "/var/lib/prism/prism.db"
//! max_connections = 5
//!
//! [session]
//! user_id = "user-123"
//!
//! [logging]
//! filter = "info,prism_session=debug"
//! ```

use std::path::PathBuf;

use prism_store::DbConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::{ConfigError, ConfigResult};
use crate::logging::DEFAULT_LOG_FILTER;

pub const ENV_DB_PATH: &str = "PRISM_DB_PATH";
pub const ENV_USER_ID: &str = "PRISM_USER_ID";
pub const ENV_LOG: &str = "PRISM_LOG";

const CONFIG_FILE_NAME: &str = "prism.toml";

// =============================================================================
// Sections
// =============================================================================

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> PathBuf {
    directories::ProjectDirs::from("com", "prism", "prism")
        .map(|dirs| dirs.data_dir().join("prism.db"))
        .unwrap_or_else(|| PathBuf::from("prism.db"))
}

fn default_max_connections() -> u32 {
    5
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            database_path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// `[session]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// The user the session runs for. Required.
    #[serde(default)]
    pub user_id: String,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives; `RUST_LOG` still wins at runtime.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Session Configuration
// =============================================================================

/// Complete session configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl SessionConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform config dir)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file in the platform config dir is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Invalid("no config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;

        info!(?path, "Session config saved");
        Ok(path)
    }

    /// Checks that the configuration can open a session.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.session.user_id.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "session.user_id is required (or set {ENV_USER_ID})"
            )));
        }

        if self.store.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store.database_path is empty".into()));
        }

        if self.store.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "store.max_connections must be greater than 0".into(),
            ));
        }

        EnvFilter::try_new(&self.logging.filter).map_err(|e| {
            ConfigError::Invalid(format!("logging.filter '{}': {e}", self.logging.filter))
        })?;

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`load`](Self::load)).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.store.database_path = PathBuf::from(path);
        }

        if let Some(user_id) = lookup(ENV_USER_ID) {
            debug!(user_id = %user_id, "Overriding user id from environment");
            self.session.user_id = user_id;
        }

        if let Some(filter) = lookup(ENV_LOG) {
            if filter.trim().is_empty() {
                warn!("Ignoring empty {ENV_LOG}");
            } else {
                self.logging.filter = filter;
            }
        }
    }

    /// Returns the pool configuration for the store.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.store.database_path).max_connections(self.store.max_connections)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "prism", "prism")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn from_file(path: &std::path::Path) -> ConfigResult<Self> {
        info!(?path, "Loading session config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}
