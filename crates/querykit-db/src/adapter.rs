//! The adapter contract shared by all database backends.

use crate::{
    error::Result,
    row::{QueryOutput, SqlValue},
};

/// Thin connect/execute/disconnect wrapper around one database client.
///
/// Lifecycle is connect, any number of execute calls, disconnect. An
/// adapter instance belongs to a single caller; there is no pooling,
/// retry or transaction management at this layer.
pub trait DatabaseAdapter {
    /// Establishes the connection.
    ///
    /// Fails with `DbError::AlreadyConnected` when the adapter is already
    /// connected.
    fn connect(&mut self) -> Result<()>;

    fn is_connected(&self) -> bool;

    /// Executes one statement with positional `?` parameters.
    ///
    /// Fails with `DbError::NotConnected` before reaching the driver when
    /// no connection is established. Driver errors propagate unchanged.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<QueryOutput>;

    /// Closes the connection; a no-op when not connected.
    fn disconnect(&mut self) -> Result<()>;
}

impl<T: DatabaseAdapter + ?Sized> DatabaseAdapter for Box<T> {
    fn connect(&mut self) -> Result<()> {
        (**self).connect()
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<QueryOutput> {
        (**self).execute(sql, params)
    }

    fn disconnect(&mut self) -> Result<()> {
        (**self).disconnect()
    }
}
