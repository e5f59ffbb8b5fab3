//! Database selection and connection parameters, loadable from TOML.

#[cfg(feature = "sqlite")]
use std::path::PathBuf;
use std::{fs, path::Path};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(any(feature = "sqlite", feature = "mysql"))]
use crate::adapter::DatabaseAdapter;
#[cfg(feature = "mysql")]
use crate::mysql::MysqlAdapter;
#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteAdapter;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    #[diagnostic(code(querykit_db::config::read))]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    #[diagnostic(
        code(querykit_db::config::parse),
        help("the file must set `driver` to a compiled-in backend")
    )]
    Toml(#[from] toml::de::Error),
}

/// Connection parameters for a MySQL server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MysqlConfig {
    /// Server hostname or IP address.
    pub host: String,

    /// Server TCP port.
    /// Default: 3306
    #[serde(default = "default_mysql_port")]
    pub port: u16,

    /// User to authenticate as.
    pub user: String,

    /// Password for the user.
    /// Default: empty
    #[serde(default)]
    pub password: String,

    /// Database to select after connecting.
    pub database: String,
}

fn default_mysql_port() -> u16 {
    3306
}

/// Backend selection, tagged by driver name.
///
/// ```toml
/// driver = "sqlite"
/// path = "data/app.db"
/// ```
///
/// ```toml
/// driver = "mysql"
/// host = "127.0.0.1"
/// user = "app"
/// database = "app"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "driver", rename_all = "lowercase")]
pub enum DatabaseConfig {
    #[cfg(feature = "sqlite")]
    Sqlite { path: PathBuf },
    #[cfg(feature = "mysql")]
    Mysql(MysqlConfig),
}

impl DatabaseConfig {
    /// Loads a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Builds the adapter this configuration describes.
    ///
    /// The adapter starts disconnected.
    #[cfg(any(feature = "sqlite", feature = "mysql"))]
    pub fn adapter(&self) -> Box<dyn DatabaseAdapter> {
        match self {
            #[cfg(feature = "sqlite")]
            DatabaseConfig::Sqlite { path } => Box::new(SqliteAdapter::new(path.clone())),
            #[cfg(feature = "mysql")]
            DatabaseConfig::Mysql(config) => Box::new(MysqlAdapter::new(config.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_parse_sqlite_config() {
        let config: DatabaseConfig = toml::from_str(
            r#"
            driver = "sqlite"
            path = "data/app.db"
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            DatabaseConfig::Sqlite {
                path: PathBuf::from("data/app.db")
            }
        );
    }

    #[cfg(feature = "mysql")]
    #[test]
    fn test_parse_mysql_config_applies_defaults() {
        let config: DatabaseConfig = toml::from_str(
            r#"
            driver = "mysql"
            host = "db.internal"
            user = "app"
            database = "app"
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            DatabaseConfig::Mysql(MysqlConfig {
                host: "db.internal".to_string(),
                port: 3306,
                user: "app".to_string(),
                password: String::new(),
                database: "app".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_driver_is_rejected() {
        let parsed = toml::from_str::<DatabaseConfig>("driver = \"postgres\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let err = DatabaseConfig::from_file("/nonexistent/db.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.toml");
        fs::write(&path, "driver = \"sqlite\"\npath = \"app.db\"\n").unwrap();

        let config = DatabaseConfig::from_file(&path).unwrap();
        assert_eq!(
            config,
            DatabaseConfig::Sqlite {
                path: PathBuf::from("app.db")
            }
        );
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_adapter_from_config() {
        let config = DatabaseConfig::Sqlite {
            path: PathBuf::from(":memory:"),
        };
        let mut adapter = config.adapter();
        adapter.connect().unwrap();
        assert!(adapter.is_connected());
    }
}
