//! SQL clause objects and their textual rendering.

use std::fmt;

use crate::{
    assemble::{Assembler, StandardAssembler},
    query::Query,
};

/// Identifies one kind of SQL clause.
///
/// Variants are declared in canonical rendering order; the assembler walks
/// kinds in this order no matter the order clauses were added in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClauseKind {
    Insert,
    Update,
    Delete,
    Select,
    From,
    Join,
    Set,
    Where,
    GroupBy,
    OrderBy,
    Limit,
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClauseKind::Insert => "INSERT",
            ClauseKind::Update => "UPDATE",
            ClauseKind::Delete => "DELETE",
            ClauseKind::Select => "SELECT",
            ClauseKind::From => "FROM",
            ClauseKind::Join => "JOIN",
            ClauseKind::Set => "SET",
            ClauseKind::Where => "WHERE",
            ClauseKind::GroupBy => "GROUP BY",
            ClauseKind::OrderBy => "ORDER BY",
            ClauseKind::Limit => "LIMIT",
        })
    }
}

/// Sort order for an ORDER BY clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        })
    }
}

/// What a SELECT clause projects.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A plain column list.
    Columns(Vec<String>),
    /// A nested query, rendered as `(...) AS alias`.
    Subquery { query: Box<Query>, alias: String },
}

/// What a FROM clause reads from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A table name.
    Table(String),
    /// A nested query, rendered as `(...) AS alias`.
    Subquery { query: Box<Query>, alias: String },
}

/// One SQL clause with its payload.
///
/// Clauses are immutable once constructed and rendering is a pure function
/// of the payload. Caller-supplied fragments (conditions, assignments,
/// column names) are emitted verbatim: no quoting, no escaping, no
/// parameter substitution at this layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Select {
        selection: Selection,
    },
    From {
        source: Source,
    },
    Join {
        table: String,
        condition: String,
    },
    Where {
        condition: String,
    },
    GroupBy {
        columns: Vec<String>,
    },
    OrderBy {
        columns: Vec<String>,
        direction: SortDirection,
    },
    Insert {
        table: String,
        columns: Vec<String>,
        values: Vec<String>,
    },
    Update {
        table: String,
    },
    Set {
        assignments: Vec<String>,
    },
    Delete {
        table: String,
    },
    Limit {
        limit: u64,
        offset: Option<u64>,
    },
}

impl Clause {
    /// The kind this clause is stored under in a [`Query`].
    pub fn kind(&self) -> ClauseKind {
        match self {
            Clause::Select { .. } => ClauseKind::Select,
            Clause::From { .. } => ClauseKind::From,
            Clause::Join { .. } => ClauseKind::Join,
            Clause::Where { .. } => ClauseKind::Where,
            Clause::GroupBy { .. } => ClauseKind::GroupBy,
            Clause::OrderBy { .. } => ClauseKind::OrderBy,
            Clause::Insert { .. } => ClauseKind::Insert,
            Clause::Update { .. } => ClauseKind::Update,
            Clause::Set { .. } => ClauseKind::Set,
            Clause::Delete { .. } => ClauseKind::Delete,
            Clause::Limit { .. } => ClauseKind::Limit,
        }
    }

    /// Renders this clause to its SQL fragment.
    ///
    /// Nested subqueries are assembled with the standard strategy; use
    /// [`Clause::render_with`] to thread a custom assembler through.
    pub fn render(&self) -> String {
        self.render_with(&StandardAssembler)
    }

    /// Renders this clause, assembling nested subqueries with `assembler`.
    pub fn render_with<A: Assembler + ?Sized>(&self, assembler: &A) -> String {
        match self {
            Clause::Select { selection } => match selection {
                Selection::Columns(columns) => format!("SELECT {}", columns.join(", ")),
                Selection::Subquery { query, alias } => {
                    format!("SELECT ({}) AS {alias}", assembler.assemble(query))
                }
            },
            Clause::From { source } => match source {
                Source::Table(table) => format!("FROM {table}"),
                Source::Subquery { query, alias } => {
                    format!("FROM ({}) AS {alias}", assembler.assemble(query))
                }
            },
            Clause::Join { table, condition } => format!("JOIN {table} ON {condition}"),
            Clause::Where { condition } => format!("WHERE {condition}"),
            Clause::GroupBy { columns } => format!("GROUP BY {}", columns.join(", ")),
            Clause::OrderBy { columns, direction } => {
                format!("ORDER BY {} {direction}", columns.join(", "))
            }
            Clause::Insert {
                table,
                columns,
                values,
            } => {
                let values = values
                    .iter()
                    .map(|v| format!("'{v}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "INSERT INTO {table} ({}) VALUES ({values})",
                    columns.join(", ")
                )
            }
            Clause::Update { table } => format!("UPDATE {table}"),
            Clause::Set { assignments } => format!("SET {}", assignments.join(", ")),
            Clause::Delete { table } => format!("DELETE FROM {table}"),
            Clause::Limit { limit, offset } => match offset {
                Some(offset) => format!("LIMIT {limit} OFFSET {offset}"),
                None => format!("LIMIT {limit}"),
            },
        }
    }
}
