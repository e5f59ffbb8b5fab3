//! SQLite adapter backed by `rusqlite`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{
    types::{ToSqlOutput, Value, ValueRef},
    Connection, ToSql,
};
use tracing::{debug, info};

use crate::{
    adapter::DatabaseAdapter,
    error::{DbError, Result},
    row::{QueryOutput, Row, SqlValue},
};

impl From<Value> for SqlValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SqlValue::Null,
            Value::Integer(i) => SqlValue::Integer(i),
            Value::Real(f) => SqlValue::Real(f),
            Value::Text(s) => SqlValue::Text(s),
            Value::Blob(b) => SqlValue::Blob(b),
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SqlValue::Real(f) => ToSqlOutput::Owned(Value::Real(*f)),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlValue::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

/// Adapter for SQLite databases.
///
/// Holds the target path up front and opens the connection on
/// [`DatabaseAdapter::connect`]. Statements that produce no result columns
/// report an affected-row count; everything else is fetched as rows.
pub struct SqliteAdapter {
    path: PathBuf,
    conn: Option<Connection>,
}

impl SqliteAdapter {
    /// Creates an adapter for the database file at `path`.
    ///
    /// The file is not touched until `connect` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: None,
        }
    }

    /// Creates an adapter for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(":memory:")
    }

    /// Path this adapter connects to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatabaseAdapter for SqliteAdapter {
    fn connect(&mut self) -> Result<()> {
        if self.conn.is_some() {
            return Err(DbError::AlreadyConnected);
        }
        let conn = Connection::open(&self.path)?;
        info!(path = %self.path.display(), "sqlite connection opened");
        self.conn = Some(conn);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<QueryOutput> {
        let conn = self.conn.as_ref().ok_or(DbError::NotConnected)?;
        debug!(sql = sql, "executing statement");

        let mut stmt = conn.prepare(sql)?;
        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();

        if stmt.column_count() == 0 {
            let affected = stmt.execute(params_ref.as_slice())?;
            return Ok(QueryOutput::Affected(affected as u64));
        }

        let columns: Arc<Vec<String>> =
            Arc::new(stmt.column_names().iter().map(|c| c.to_string()).collect());

        let mut fetched = Vec::new();
        let mut rows = stmt.query(params_ref.as_slice())?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                let value: Value = row.get(idx)?;
                values.push(SqlValue::from(value));
            }
            fetched.push(Row::new(Arc::clone(&columns), values));
        }
        Ok(QueryOutput::Rows(fetched))
    }

    fn disconnect(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, err)| DbError::from(err))?;
            info!("sqlite connection closed");
        }
        Ok(())
    }
}
