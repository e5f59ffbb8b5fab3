pub mod adapter;
pub mod config;
pub mod error;
pub mod exec;
#[cfg(feature = "mysql")]
pub mod mysql;
pub mod row;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use adapter::DatabaseAdapter;
pub use config::{ConfigError, DatabaseConfig, MysqlConfig};
pub use error::{DbError, Result};
pub use exec::{DatabaseExecution, ExecutionStrategy, MockExecution, Outcome, PrintExecution};
#[cfg(feature = "mysql")]
pub use self::mysql::MysqlAdapter;
pub use row::{QueryOutput, Row, SqlValue};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteAdapter;
