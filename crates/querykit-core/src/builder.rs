//! Fluent construction of SQL queries.

use crate::{
    assemble::{Assembler, StandardAssembler},
    clause::{Clause, Selection, SortDirection, Source},
    error::Result,
    query::Query,
};

/// Fluent query builder: one method per clause kind, a terminal
/// [`build`](QueryBuilder::build).
///
/// Every method consumes and returns the builder, so calls chain. Calling
/// a method for a clause kind that was already set replaces the earlier
/// clause. `build()` validates the accumulated clauses and assembles them
/// into the final SQL string.
///
/// # Example
///
/// ```rust
/// use querykit_core::QueryBuilder;
///
/// let sql = QueryBuilder::new()
///     .select(["id", "name"])
///     .from_table("users")
///     .filter("age > 30")
///     .build()
///     .unwrap();
///
/// assert_eq!(sql, "SELECT id, name FROM users WHERE age > 30");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder<A: Assembler = StandardAssembler> {
    query: Query,
    assembler: A,
}

impl QueryBuilder<StandardAssembler> {
    /// Builder using the standard assembly strategy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: Assembler> QueryBuilder<A> {
    /// Builder using a custom assembly strategy.
    pub fn with_assembler(assembler: A) -> Self {
        Self {
            query: Query::new(),
            assembler,
        }
    }

    /// SELECT the given columns.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.add(Clause::Select {
            selection: Selection::Columns(columns.into_iter().map(Into::into).collect()),
        });
        self
    }

    /// SELECT a nested query, rendered as `(...) AS alias`.
    pub fn select_subquery(mut self, query: Query, alias: impl Into<String>) -> Self {
        self.query.add(Clause::Select {
            selection: Selection::Subquery {
                query: Box::new(query),
                alias: alias.into(),
            },
        });
        self
    }

    /// FROM the given table.
    pub fn from_table(mut self, table: impl Into<String>) -> Self {
        self.query.add(Clause::From {
            source: Source::Table(table.into()),
        });
        self
    }

    /// FROM a nested query, rendered as `(...) AS alias`.
    pub fn from_subquery(mut self, query: Query, alias: impl Into<String>) -> Self {
        self.query.add(Clause::From {
            source: Source::Subquery {
                query: Box::new(query),
                alias: alias.into(),
            },
        });
        self
    }

    /// WHERE condition, taken verbatim.
    pub fn filter(mut self, condition: impl Into<String>) -> Self {
        self.query.add(Clause::Where {
            condition: condition.into(),
        });
        self
    }

    /// JOIN `table` ON `condition`.
    pub fn join(mut self, table: impl Into<String>, condition: impl Into<String>) -> Self {
        self.query.add(Clause::Join {
            table: table.into(),
            condition: condition.into(),
        });
        self
    }

    /// GROUP BY the given columns.
    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.add(Clause::GroupBy {
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// ORDER BY the given columns.
    pub fn order_by<I, S>(mut self, columns: I, direction: SortDirection) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.add(Clause::OrderBy {
            columns: columns.into_iter().map(Into::into).collect(),
            direction,
        });
        self
    }

    /// INSERT INTO `table`, one value per column.
    pub fn insert<C, S, V, T>(mut self, table: impl Into<String>, columns: C, values: V) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        V: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.query.add(Clause::Insert {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// UPDATE the given table.
    pub fn update(mut self, table: impl Into<String>) -> Self {
        self.query.add(Clause::Update {
            table: table.into(),
        });
        self
    }

    /// SET assignments for an UPDATE, taken verbatim.
    pub fn set<I, S>(mut self, assignments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.add(Clause::Set {
            assignments: assignments.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// DELETE FROM the given table.
    pub fn delete(mut self, table: impl Into<String>) -> Self {
        self.query.add(Clause::Delete {
            table: table.into(),
        });
        self
    }

    /// LIMIT the result count.
    pub fn limit(mut self, limit: u64) -> Self {
        self.query.add(Clause::Limit {
            limit,
            offset: None,
        });
        self
    }

    /// LIMIT the result count, skipping `offset` rows first.
    pub fn limit_offset(mut self, limit: u64, offset: u64) -> Self {
        self.query.add(Clause::Limit {
            limit,
            offset: Some(offset),
        });
        self
    }

    /// Validates the accumulated clauses, then assembles the SQL string.
    pub fn build(self) -> Result<String> {
        self.query.validate()?;
        Ok(self.assembler.assemble(&self.query))
    }

    /// Hands back the raw query context, e.g. to nest it as a subquery.
    pub fn into_query(self) -> Query {
        self.query
    }
}
