//! The query context: accumulated clauses for one statement.

use std::collections::BTreeMap;

use crate::{
    clause::{Clause, ClauseKind, Selection, Source},
    error::{QueryError, Result},
};

/// Root clause kinds; a valid query carries exactly one of these.
const ROOT_KINDS: [ClauseKind; 4] = [
    ClauseKind::Insert,
    ClauseKind::Update,
    ClauseKind::Delete,
    ClauseKind::Select,
];

/// Accumulated clauses for one query under construction.
///
/// Holds at most one clause per kind; adding a clause whose kind is already
/// present replaces the earlier one. Insertion order carries no meaning,
/// the assembler fixes the rendering order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    clauses: BTreeMap<ClauseKind, Clause>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause, replacing any existing clause of the same kind.
    pub fn add(&mut self, clause: Clause) {
        self.clauses.insert(clause.kind(), clause);
    }

    /// The clause stored for `kind`, if any.
    pub fn get(&self, kind: ClauseKind) -> Option<&Clause> {
        self.clauses.get(&kind)
    }

    pub fn contains(&self, kind: ClauseKind) -> bool {
        self.clauses.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Iterates the stored clauses in kind order.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.values()
    }

    /// Checks the logical consistency of the accumulated clauses.
    ///
    /// The rules are keyed by the root clause: SELECT requires FROM, UPDATE
    /// requires SET, DELETE must not carry FROM, INSERT needs a matching
    /// column/value list. Subqueries are validated recursively. Must pass
    /// before the query is assembled or executed.
    pub fn validate(&self) -> Result<()> {
        let mut roots = ROOT_KINDS.iter().copied().filter(|kind| self.contains(*kind));
        let root = roots.next().ok_or(QueryError::MissingRoot)?;
        if let Some(other) = roots.next() {
            return Err(QueryError::ConflictingRoots(root, other));
        }

        match root {
            ClauseKind::Select => {
                if !self.contains(ClauseKind::From) {
                    return Err(QueryError::MissingFrom);
                }
            }
            ClauseKind::Update => {
                if !self.contains(ClauseKind::Set) {
                    return Err(QueryError::MissingSet);
                }
            }
            ClauseKind::Delete => {
                if self.contains(ClauseKind::From) {
                    return Err(QueryError::UnexpectedFrom);
                }
            }
            ClauseKind::Insert => {
                if let Some(Clause::Insert { columns, values, .. }) = self.get(ClauseKind::Insert)
                {
                    if columns.is_empty() || values.is_empty() {
                        return Err(QueryError::EmptyInsert);
                    }
                    if columns.len() != values.len() {
                        return Err(QueryError::InsertMismatch {
                            columns: columns.len(),
                            values: values.len(),
                        });
                    }
                }
            }
            _ => {}
        }

        for clause in self.clauses.values() {
            if let Some(subquery) = subquery_of(clause) {
                subquery.validate()?;
            }
        }
        Ok(())
    }
}

fn subquery_of(clause: &Clause) -> Option<&Query> {
    match clause {
        Clause::Select {
            selection: Selection::Subquery { query, .. },
        } => Some(query),
        Clause::From {
            source: Source::Subquery { query, .. },
        } => Some(query),
        _ => None,
    }
}
