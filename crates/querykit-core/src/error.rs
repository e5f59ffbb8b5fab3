//! Error types for querykit-core.

use miette::Diagnostic;
use thiserror::Error;

use crate::clause::ClauseKind;

/// Validation error raised before a query is assembled.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("query has no root clause (SELECT, INSERT, UPDATE or DELETE)")]
    #[diagnostic(
        code(querykit::validate::missing_root),
        help("Start the query with select(), insert(), update() or delete()")
    )]
    MissingRoot,

    #[error("conflicting root clauses: {0} and {1}")]
    #[diagnostic(
        code(querykit::validate::conflicting_roots),
        help("Build one statement per query; split this into two queries")
    )]
    ConflictingRoots(ClauseKind, ClauseKind),

    #[error("SELECT query requires a FROM clause")]
    #[diagnostic(
        code(querykit::validate::missing_from),
        help("Add from_table() or from_subquery() before building")
    )]
    MissingFrom,

    #[error("UPDATE query requires a SET clause")]
    #[diagnostic(
        code(querykit::validate::missing_set),
        help("Add set() with at least one assignment before building")
    )]
    MissingSet,

    #[error("DELETE query should not have a FROM clause")]
    #[diagnostic(
        code(querykit::validate::unexpected_from),
        help("DELETE names its table directly; drop the from_table() call")
    )]
    UnexpectedFrom,

    #[error("INSERT query requires columns and values")]
    #[diagnostic(
        code(querykit::validate::empty_insert),
        help("Provide at least one column and one value to insert()")
    )]
    EmptyInsert,

    #[error("INSERT column/value count mismatch: {columns} columns, {values} values")]
    #[diagnostic(
        code(querykit::validate::insert_mismatch),
        help("Pass exactly one value per inserted column")
    )]
    InsertMismatch { columns: usize, values: usize },
}

/// Result type alias for querykit-core operations.
pub type Result<T> = std::result::Result<T, QueryError>;
