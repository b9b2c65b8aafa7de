use super::required;
use crate::clauses::{non_blank, ClauseTail, Limit, WhereClause};
use crate::error::Result;
use crate::types::{BindMap, RenderedStatement, StatementKind};

/// `DELETE FROM <table>` with optional WHERE, ORDER BY and LIMIT.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    table: String,
    tail: ClauseTail,
}

impl Delete {
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            tail: ClauseTail::default(),
        }
    }

    pub fn where_(mut self, clause: impl Into<WhereClause>) -> Self {
        self.tail.where_clause = Some(clause.into());
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.tail.order_by = non_blank(order_by);
        self
    }

    pub fn limit(mut self, count: u64) -> Self {
        self.tail.limit = Some(Limit::new(count));
        self
    }

    pub fn build(&self) -> Result<RenderedStatement> {
        let table = required(&self.table, "table name")?;

        let mut sql = format!("DELETE FROM {}", table);
        let mut bindings = BindMap::new();
        self.tail.render(&mut sql, &mut bindings)?;

        Ok(RenderedStatement::new(StatementKind::Delete, sql).with_bindings(bindings))
    }
}
