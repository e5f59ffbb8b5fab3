//! MySQL adapter backed by the `mysql` crate.

use std::sync::Arc;

use mysql::{prelude::Queryable, Conn, Opts, OptsBuilder, Params};
use tracing::{debug, info};

use crate::{
    adapter::DatabaseAdapter,
    config::MysqlConfig,
    error::{DbError, Result},
    row::{QueryOutput, Row, SqlValue},
};

impl From<&SqlValue> for mysql::Value {
    fn from(value: &SqlValue) -> Self {
        match value {
            SqlValue::Null => mysql::Value::NULL,
            SqlValue::Integer(i) => mysql::Value::Int(*i),
            SqlValue::Real(f) => mysql::Value::Double(*f),
            SqlValue::Text(s) => mysql::Value::Bytes(s.as_bytes().to_vec()),
            SqlValue::Blob(b) => mysql::Value::Bytes(b.clone()),
        }
    }
}

impl From<mysql::Value> for SqlValue {
    fn from(value: mysql::Value) -> Self {
        match value {
            mysql::Value::NULL => SqlValue::Null,
            mysql::Value::Int(i) => SqlValue::Integer(i),
            // Counts and unsigned columns rarely exceed i64; fall back to
            // text instead of wrapping when one does.
            mysql::Value::UInt(u) => match i64::try_from(u) {
                Ok(i) => SqlValue::Integer(i),
                Err(_) => SqlValue::Text(u.to_string()),
            },
            mysql::Value::Float(f) => SqlValue::Real(f64::from(f)),
            mysql::Value::Double(f) => SqlValue::Real(f),
            mysql::Value::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(text) => SqlValue::Text(text),
                Err(err) => SqlValue::Blob(err.into_bytes()),
            },
            mysql::Value::Date(year, month, day, hour, minute, second, micro) => {
                let mut text = format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                );
                if micro > 0 {
                    text.push_str(&format!(".{micro:06}"));
                }
                SqlValue::Text(text)
            }
            mysql::Value::Time(negative, days, hours, minutes, seconds, micro) => {
                let sign = if negative { "-" } else { "" };
                let hours = u32::from(hours) + days * 24;
                let mut text = format!("{sign}{hours:02}:{minutes:02}:{seconds:02}");
                if micro > 0 {
                    text.push_str(&format!(".{micro:06}"));
                }
                SqlValue::Text(text)
            }
        }
    }
}

/// Statements starting with SELECT are fetched as rows; everything else
/// reports an affected-row count.
fn is_select(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("SELECT"))
}

fn positional(params: &[SqlValue]) -> Params {
    Params::Positional(params.iter().map(mysql::Value::from).collect())
}

fn rows_from(raw: Vec<mysql::Row>) -> QueryOutput {
    let columns: Arc<Vec<String>> = Arc::new(
        raw.first()
            .map(|row| {
                row.columns_ref()
                    .iter()
                    .map(|col| col.name_str().into_owned())
                    .collect()
            })
            .unwrap_or_default(),
    );

    let rows = raw
        .into_iter()
        .map(|row| {
            let values = row.unwrap().into_iter().map(SqlValue::from).collect();
            Row::new(Arc::clone(&columns), values)
        })
        .collect();
    QueryOutput::Rows(rows)
}

/// Adapter for MySQL servers.
///
/// Connection parameters come from a [`MysqlConfig`]; the TCP connection is
/// established on [`DatabaseAdapter::connect`].
pub struct MysqlAdapter {
    config: MysqlConfig,
    conn: Option<Conn>,
}

impl MysqlAdapter {
    pub fn new(config: MysqlConfig) -> Self {
        Self { config, conn: None }
    }

    /// Connection parameters this adapter was built with.
    pub fn config(&self) -> &MysqlConfig {
        &self.config
    }

    fn opts(&self) -> Opts {
        let builder = OptsBuilder::new()
            .ip_or_hostname(Some(self.config.host.clone()))
            .tcp_port(self.config.port)
            .user(Some(self.config.user.clone()))
            .pass(Some(self.config.password.clone()))
            .db_name(Some(self.config.database.clone()));
        Opts::from(builder)
    }
}

impl DatabaseAdapter for MysqlAdapter {
    fn connect(&mut self) -> Result<()> {
        if self.conn.is_some() {
            return Err(DbError::AlreadyConnected);
        }
        let conn = Conn::new(self.opts())?;
        info!(
            host = %self.config.host,
            database = %self.config.database,
            "mysql connection opened"
        );
        self.conn = Some(conn);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<QueryOutput> {
        let conn = self.conn.as_mut().ok_or(DbError::NotConnected)?;
        debug!(sql = sql, "executing statement");

        if is_select(sql) {
            let raw: Vec<mysql::Row> = if params.is_empty() {
                conn.query(sql)?
            } else {
                conn.exec(sql, positional(params))?
            };
            return Ok(rows_from(raw));
        }

        if params.is_empty() {
            conn.query_drop(sql)?;
        } else {
            conn.exec_drop(sql, positional(params))?;
        }
        Ok(QueryOutput::Affected(conn.affected_rows()))
    }

    fn disconnect(&mut self) -> Result<()> {
        if self.conn.take().is_some() {
            info!("mysql connection closed");
        }
        Ok(())
    }
}
