use super::required;
use crate::clauses::{non_blank, ClauseTail, Limit, WhereClause};
use crate::error::Result;
use crate::types::{BindMap, RenderedStatement, StatementKind};

/// `SELECT <list> FROM <table>` with optional WHERE, GROUP BY, HAVING,
/// ORDER BY and LIMIT, always in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    table: String,
    columns: String,
    tail: ClauseTail,
}

impl Select {
    /// Selects `*` from `table`. The table reference may be any FROM
    /// fragment, joins included.
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: "*".to_string(),
            tail: ClauseTail::default(),
        }
    }

    /// Sets the select list, e.g. `id, name`. Blank keeps `*`.
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = non_blank(columns).unwrap_or_else(|| "*".to_string());
        self
    }

    /// Add a WHERE clause to the query.
    pub fn where_(mut self, clause: impl Into<WhereClause>) -> Self {
        self.tail.where_clause = Some(clause.into());
        self
    }

    pub fn group_by(mut self, group_by: impl Into<String>) -> Self {
        self.tail.group_by = non_blank(group_by);
        self
    }

    pub fn having(mut self, having: impl Into<String>) -> Self {
        self.tail.having = non_blank(having);
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.tail.order_by = non_blank(order_by);
        self
    }

    /// Add a LIMIT to the query.
    pub fn limit(mut self, count: u64) -> Self {
        self.tail.limit = Some(Limit::new(count));
        self
    }

    /// `LIMIT <offset>, <count>`
    pub fn limit_offset(mut self, count: u64, offset: u64) -> Self {
        self.tail.limit = Some(Limit::with_offset(count, offset));
        self
    }

    /// Build the SQL query string and parameters.
    pub fn build(&self) -> Result<RenderedStatement> {
        let table = required(&self.table, "table reference")?;

        let mut sql = String::with_capacity(64);
        let mut bindings = BindMap::new();

        sql.push_str("SELECT ");
        sql.push_str(&self.columns);
        sql.push_str(" FROM ");
        sql.push_str(table);
        self.tail.render(&mut sql, &mut bindings)?;

        Ok(RenderedStatement::new(StatementKind::Select, sql).with_bindings(bindings))
    }
}
