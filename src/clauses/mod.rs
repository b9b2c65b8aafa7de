mod tail;
mod where_clause;

pub(crate) use tail::non_blank;
pub use tail::{ClauseTail, Limit};
pub use where_clause::WhereClause;
