//! Application configuration.
//!
//! Layered with the `config` crate, lowest priority first:
//!
//! ```text
//! built-in defaults
//!     ▼
//! stockroom.toml         (optional; path from STOCKROOM_CONFIG)
//!     ▼
//! STOCKROOM_* env vars   (nested keys joined with "__",
//!                         e.g. STOCKROOM_DATABASE__PATH=/data/inv.db)
//! ```

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use stockroom_db::{Backend, DbConfig};

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "stockroom.toml";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_VAR: &str = "STOCKROOM_CONFIG";

const ENV_PREFIX: &str = "STOCKROOM";

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Which product store to use
    pub backend: Backend,

    /// Preload the demo catalog into an in-memory store
    pub seed_demo_data: bool,

    /// Shown in the menu banner
    pub store_name: String,

    /// Where export reports are written
    pub export_dir: PathBuf,

    /// Clear the terminal between screens
    pub clear_screen: bool,

    pub database: DatabaseSettings,

    pub log: LogSettings,
}

/// SQLite connection target.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub create_if_missing: bool,
}

/// Log file location and filters.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub directory: PathBuf,
    pub file_name: String,
    /// EnvFilter directive for the log file (overridden by RUST_LOG)
    pub level: String,
    /// EnvFilter directive for stderr; "off" disables it
    pub console_level: String,
}

impl DatabaseSettings {
    pub fn to_db_config(&self) -> DbConfig {
        DbConfig::new(&self.path)
            .max_connections(self.max_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .create_if_missing(self.create_if_missing)
    }
}

impl AppConfig {
    /// Load configuration from the default file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::load_from(Path::new(&path), true, None),
            Err(_) => Self::load_from(Path::new(DEFAULT_CONFIG_FILE), false, None),
        }
    }

    /// Load configuration from `path`, with an optional replacement for the
    /// process environment. A missing file is an error only when `required`.
    pub fn load_from(
        path: &Path,
        required: bool,
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let settings = Config::builder()
            .set_default("backend", "sqlite")?
            .set_default("seed_demo_data", false)?
            .set_default("store_name", "TECH STORE")?
            .set_default("export_dir", "exports-txt")?
            .set_default("clear_screen", true)?
            .set_default("database.path", "inventario.db")?
            .set_default("database.max_connections", 1_i64)?
            .set_default("database.connect_timeout_secs", 5_i64)?
            .set_default("database.create_if_missing", true)?
            .set_default("log.directory", ".")?
            .set_default("log.file_name", "operaciones.log")?
            .set_default("log.level", "info")?
            .set_default("log.console_level", "off")?
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env_vars),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue("database.max_connections".to_string()));
        }
        if self.export_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("export_dir".to_string()));
        }
        if self.log.file_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue("log.file_name".to_string()));
        }
        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            AppConfig::load_from(&dir.path().join(DEFAULT_CONFIG_FILE), false, vars(&[])).unwrap();

        assert_eq!(config.backend, Backend::Sqlite);
        assert!(!config.seed_demo_data);
        assert_eq!(config.store_name, "TECH STORE");
        assert_eq!(config.export_dir, PathBuf::from("exports-txt"));
        assert_eq!(config.database.path, PathBuf::from("inventario.db"));
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.log.file_name, "operaciones.log");
        assert_eq!(config.log.console_level, "off");
    }

    #[test]
    fn test_file_and_env_layers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "backend = \"list\"\nstore_name = \"MI TIENDA\"\n\n[database]\npath = \"otra.db\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(
            &path,
            true,
            vars(&[
                ("STOCKROOM_BACKEND", "map"),
                ("STOCKROOM_DATABASE__CONNECT_TIMEOUT_SECS", "9"),
            ]),
        )
        .unwrap();

        // Environment beats the file, the file beats defaults.
        assert_eq!(config.backend, Backend::Map);
        assert_eq!(config.store_name, "MI TIENDA");
        assert_eq!(config.database.path, PathBuf::from("otra.db"));
        assert_eq!(config.database.connect_timeout_secs, 9);
        assert_eq!(
            config.database.to_db_config().connect_timeout,
            Duration::from_secs(9)
        );
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(
            &dir.path().join(DEFAULT_CONFIG_FILE),
            false,
            vars(&[("STOCKROOM_BACKEND", "postgres")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_zero_pool_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(
            &dir.path().join(DEFAULT_CONFIG_FILE),
            false,
            vars(&[("STOCKROOM_DATABASE__MAX_CONNECTIONS", "0")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(&dir.path().join("nope.toml"), true, vars(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }
}
