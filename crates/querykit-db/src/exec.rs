//! Execution strategies: what happens to an assembled query.

use std::io::{self, Write};

use tracing::debug;

use crate::{
    adapter::DatabaseAdapter,
    error::{DbError, Result},
    row::{QueryOutput, Row, SqlValue},
};

/// Result of dispatching one query to an execution strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The query was written to an output stream; nothing was executed.
    Printed,
    /// Canned response from the mock strategy.
    Simulated { status: String, query: String },
    /// Rows fetched through a database adapter.
    Rows(Vec<Row>),
    /// Affected-row count reported through a database adapter.
    Affected(u64),
}

impl Outcome {
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            Outcome::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn affected(&self) -> Option<u64> {
        match self {
            Outcome::Affected(count) => Some(*count),
            _ => None,
        }
    }
}

/// Strategy for dispatching assembled queries.
///
/// Each implementation consumes final SQL text; none of them reaches back
/// into query construction.
pub trait ExecutionStrategy {
    /// Dispatches one statement with positional parameters.
    fn execute_with(&mut self, sql: &str, params: &[SqlValue]) -> Result<Outcome>;

    /// Dispatches one statement without parameters.
    fn execute(&mut self, sql: &str) -> Result<Outcome> {
        self.execute_with(sql, &[])
    }
}

/// Writes each query to an output stream instead of executing it.
///
/// Defaults to standard output; any writer works, which lets tests capture
/// what would have been printed.
pub struct PrintExecution<W: Write = io::Stdout> {
    out: W,
}

impl PrintExecution<io::Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for PrintExecution<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> PrintExecution<W> {
    /// Prints into the given writer instead of stdout.
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    /// Consumes the strategy, returning the writer.
    pub fn into_writer(self) -> W {
        self.out
    }
}

impl<W: Write> ExecutionStrategy for PrintExecution<W> {
    fn execute_with(&mut self, sql: &str, _params: &[SqlValue]) -> Result<Outcome> {
        writeln!(self.out, "{sql}")?;
        Ok(Outcome::Printed)
    }
}

/// Simulates execution without any I/O.
///
/// Records every dispatched statement for later inspection, so call sites
/// can be tested without a real database. Responds with the deterministic
/// [`Outcome::Simulated`] value, or with canned rows when configured via
/// [`MockExecution::with_rows`].
#[derive(Debug, Default)]
pub struct MockExecution {
    executed: Vec<String>,
    canned: Option<Vec<Row>>,
}

impl MockExecution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Responds to every statement with the given rows.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            executed: Vec::new(),
            canned: Some(rows),
        }
    }

    /// The statements dispatched so far, in order.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

impl ExecutionStrategy for MockExecution {
    fn execute_with(&mut self, sql: &str, _params: &[SqlValue]) -> Result<Outcome> {
        self.executed.push(sql.to_string());
        Ok(match &self.canned {
            Some(rows) => Outcome::Rows(rows.clone()),
            None => Outcome::Simulated {
                status: "success".to_string(),
                query: sql.to_string(),
            },
        })
    }
}

/// Runs queries against a real database through an adapter.
///
/// The adapter must already be connected; a disconnected adapter fails the
/// dispatch without the statement ever reaching it.
pub struct DatabaseExecution<A: DatabaseAdapter> {
    adapter: A,
}

impl<A: DatabaseAdapter> DatabaseExecution<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn into_inner(self) -> A {
        self.adapter
    }
}

impl<A: DatabaseAdapter> ExecutionStrategy for DatabaseExecution<A> {
    fn execute_with(&mut self, sql: &str, params: &[SqlValue]) -> Result<Outcome> {
        if !self.adapter.is_connected() {
            return Err(DbError::NotConnected);
        }
        debug!("dispatching query: {sql}");
        Ok(match self.adapter.execute(sql, params)? {
            QueryOutput::Rows(rows) => Outcome::Rows(rows),
            QueryOutput::Affected(count) => Outcome::Affected(count),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    /// Adapter double that records what reaches it.
    #[derive(Default)]
    struct FakeAdapter {
        connected: bool,
        received: Vec<String>,
    }

    impl DatabaseAdapter for FakeAdapter {
        fn connect(&mut self) -> Result<()> {
            if self.connected {
                return Err(DbError::AlreadyConnected);
            }
            self.connected = true;
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.connected
        }

        fn execute(&mut self, sql: &str, _params: &[SqlValue]) -> Result<QueryOutput> {
            self.received.push(sql.to_string());
            Ok(QueryOutput::Affected(1))
        }

        fn disconnect(&mut self) -> Result<()> {
            self.connected = false;
            Ok(())
        }
    }

    fn sample_row() -> Row {
        Row::new(
            Arc::new(vec!["id".to_string()]),
            vec![SqlValue::Integer(1)],
        )
    }

    #[test]
    fn test_print_writes_query_to_stream() {
        let mut print = PrintExecution::with_writer(Vec::new());
        let outcome = print.execute("SELECT 1").unwrap();
        assert_eq!(outcome, Outcome::Printed);
        assert_eq!(print.into_writer(), b"SELECT 1\n");
    }

    #[test]
    fn test_mock_returns_deterministic_outcome() {
        let mut mock = MockExecution::new();
        let outcome = mock.execute("DROP TABLE nothing").unwrap();
        assert_eq!(
            outcome,
            Outcome::Simulated {
                status: "success".to_string(),
                query: "DROP TABLE nothing".to_string(),
            }
        );

        // Same shape whatever the query content is.
        let again = mock.execute("SELECT anything").unwrap();
        assert_eq!(
            again,
            Outcome::Simulated {
                status: "success".to_string(),
                query: "SELECT anything".to_string(),
            }
        );
    }

    #[test]
    fn test_mock_records_dispatched_statements() {
        let mut mock = MockExecution::new();
        mock.execute("SELECT 1").unwrap();
        mock.execute_with("SELECT ?", &[SqlValue::Integer(2)]).unwrap();
        assert_eq!(mock.executed(), ["SELECT 1", "SELECT ?"]);
    }

    #[test]
    fn test_mock_with_canned_rows() {
        let mut mock = MockExecution::with_rows(vec![sample_row()]);
        let outcome = mock.execute("SELECT id FROM users").unwrap();
        assert_eq!(outcome.rows().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_disconnected_adapter_never_receives_query() {
        let mut exec = DatabaseExecution::new(FakeAdapter::default());
        let err = exec.execute("DELETE FROM users").unwrap_err();
        assert!(matches!(err, DbError::NotConnected));
        assert!(exec.adapter().received.is_empty());
    }

    #[test]
    fn test_connected_adapter_receives_query() {
        let mut exec = DatabaseExecution::new(FakeAdapter::default());
        exec.adapter_mut().connect().unwrap();

        let outcome = exec.execute("DELETE FROM users").unwrap();
        assert_eq!(outcome.affected(), Some(1));
        assert_eq!(exec.into_inner().received, ["DELETE FROM users"]);
    }

    #[test]
    fn test_strategies_are_object_safe() {
        let strategies: Vec<Box<dyn ExecutionStrategy>> = vec![
            Box::new(PrintExecution::with_writer(Vec::new())),
            Box::new(MockExecution::new()),
            Box::new(DatabaseExecution::new(FakeAdapter::default())),
        ];
        assert_eq!(strategies.len(), 3);
    }
}
