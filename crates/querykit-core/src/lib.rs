pub mod assemble;
pub mod builder;
pub mod clause;
pub mod error;
pub mod query;

pub use assemble::{Assembler, StandardAssembler, CLAUSE_ORDER};
pub use builder::QueryBuilder;
pub use clause::{Clause, ClauseKind, Selection, SortDirection, Source};
pub use error::{QueryError, Result};
pub use query::Query;
