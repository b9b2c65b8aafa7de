use super::WhereClause;
use crate::error::Result;
use crate::types::BindMap;

/// A MySQL `LIMIT`, optionally with an offset (`LIMIT offset, count`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub count: u64,
    pub offset: Option<u64>,
}

impl Limit {
    pub fn new(count: u64) -> Self {
        Self {
            count,
            offset: None,
        }
    }

    pub fn with_offset(count: u64, offset: u64) -> Self {
        Self {
            count,
            offset: Some(offset),
        }
    }
}

impl From<u64> for Limit {
    fn from(count: u64) -> Self {
        Limit::new(count)
    }
}

/// Optional trailing clauses, appended in the fixed order
/// WHERE, GROUP BY, HAVING, ORDER BY, LIMIT. Absent or blank clauses are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseTail {
    pub where_clause: Option<WhereClause>,
    pub group_by: Option<String>,
    pub having: Option<String>,
    pub order_by: Option<String>,
    pub limit: Option<Limit>,
}

impl ClauseTail {
    /// Names the WHERE clause binds itself; generated placeholders avoid them.
    pub(crate) fn reserved_names(&self) -> Vec<String> {
        self.where_clause
            .as_ref()
            .map(WhereClause::raw_names)
            .unwrap_or_default()
    }

    pub(crate) fn render(&self, sql: &mut String, bindings: &mut BindMap) -> Result<()> {
        if let Some(where_clause) = self.where_clause.as_ref().filter(|w| !w.is_blank()) {
            sql.push_str(" WHERE ");
            let where_sql = where_clause.build_sql(bindings)?;
            sql.push_str(&where_sql);
        }

        push_fragment(sql, " GROUP BY ", &self.group_by);
        push_fragment(sql, " HAVING ", &self.having);
        push_fragment(sql, " ORDER BY ", &self.order_by);

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            if let Some(offset) = limit.offset {
                sql.push_str(&offset.to_string());
                sql.push_str(", ");
            }
            sql.push_str(&limit.count.to_string());
        }
        Ok(())
    }
}

fn push_fragment(sql: &mut String, keyword: &str, fragment: &Option<String>) {
    if let Some(fragment) = fragment.as_deref().filter(|f| !f.trim().is_empty()) {
        sql.push_str(keyword);
        sql.push_str(fragment);
    }
}

/// Optional text clause setter input: empty strings mean "absent".
pub(crate) fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.trim().is_empty()).then_some(value)
}
