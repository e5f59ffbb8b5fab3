//! Error types for querykit-db.

use miette::Diagnostic;
use thiserror::Error;

/// Database error type for querykit-db operations.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Database connection not established")]
    #[diagnostic(
        code(querykit_db::not_connected),
        help("Call connect() on the adapter before executing queries")
    )]
    NotConnected,

    #[error("Database connection already established")]
    #[diagnostic(
        code(querykit_db::already_connected),
        help("Call disconnect() before connecting again")
    )]
    AlreadyConnected,

    #[error("IO error: {0}")]
    #[diagnostic(
        code(querykit_db::io),
        help("Check the output stream and file permissions")
    )]
    Io(#[from] std::io::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    #[diagnostic(
        code(querykit_db::sqlite),
        help("Check the database file and the statement being executed")
    )]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "mysql")]
    #[error("MySQL error: {0}")]
    #[diagnostic(
        code(querykit_db::mysql),
        help("Check the server address, credentials and the statement being executed")
    )]
    Mysql(#[from] mysql::Error),
}

/// Result type alias for querykit-db operations.
pub type Result<T> = std::result::Result<T, DbError>;
