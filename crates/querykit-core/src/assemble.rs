//! Query assembly: canonical clause ordering and the strategy seam.

use tracing::debug;

use crate::{clause::ClauseKind, query::Query};

/// Canonical rendering order.
///
/// A single total order covers reads (SELECT, FROM, JOIN, WHERE, GROUP BY,
/// ORDER BY, LIMIT) and writes (INSERT/UPDATE/DELETE, SET, WHERE). Absent
/// kinds are skipped at assembly time.
pub const CLAUSE_ORDER: [ClauseKind; 11] = [
    ClauseKind::Insert,
    ClauseKind::Update,
    ClauseKind::Delete,
    ClauseKind::Select,
    ClauseKind::From,
    ClauseKind::Join,
    ClauseKind::Set,
    ClauseKind::Where,
    ClauseKind::GroupBy,
    ClauseKind::OrderBy,
    ClauseKind::Limit,
];

/// Strategy for turning a [`Query`] into SQL text.
///
/// Assembly is infallible; it is expected to run only after
/// [`Query::validate`] has passed.
pub trait Assembler {
    fn assemble(&self, query: &Query) -> String;
}

/// Renders present clauses in [`CLAUSE_ORDER`], joined by single spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAssembler;

impl Assembler for StandardAssembler {
    fn assemble(&self, query: &Query) -> String {
        let sql = CLAUSE_ORDER
            .iter()
            .filter_map(|kind| query.get(*kind))
            .map(|clause| clause.render_with(self))
            .collect::<Vec<_>>()
            .join(" ");
        debug!("assembled query: {sql}");
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{Clause, Selection, Source};

    fn read_query() -> Query {
        let mut query = Query::new();
        query.add(Clause::Where {
            condition: "age > 30".to_string(),
        });
        query.add(Clause::From {
            source: Source::Table("users".to_string()),
        });
        query.add(Clause::Select {
            selection: Selection::Columns(vec!["id".to_string()]),
        });
        query
    }

    #[test]
    fn test_renders_in_canonical_order_not_insertion_order() {
        let sql = StandardAssembler.assemble(&read_query());
        assert_eq!(sql, "SELECT id FROM users WHERE age > 30");
    }

    #[test]
    fn test_skips_absent_kinds() {
        let mut query = Query::new();
        query.add(Clause::Delete {
            table: "users".to_string(),
        });
        query.add(Clause::Where {
            condition: "age < 18".to_string(),
        });
        let sql = StandardAssembler.assemble(&query);
        assert_eq!(sql, "DELETE FROM users WHERE age < 18");
    }

    #[test]
    fn test_empty_query_assembles_to_empty_string() {
        assert_eq!(StandardAssembler.assemble(&Query::new()), "");
    }

    #[test]
    fn test_custom_assembler_is_honored() {
        struct Multiline;

        impl Assembler for Multiline {
            fn assemble(&self, query: &Query) -> String {
                CLAUSE_ORDER
                    .iter()
                    .filter_map(|kind| query.get(*kind))
                    .map(|clause| clause.render_with(self))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }

        let sql = Multiline.assemble(&read_query());
        assert_eq!(sql, "SELECT id\nFROM users\nWHERE age > 30");
    }
}
